//! [`Property`]-related [`Backend`] implementations.

use common::{
    operations::{By, Delete, Insert, Select},
    Money,
};
use serde::{Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::{
    domain::{property, Property},
    infra::{
        backend::{self, http::Error},
        Backend, Http,
    },
    read::property::list::Filter,
};

use super::{kind, non_negative, optional_text, text, validate};

/// [`Property`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct Record {
    id: property::Id,
    name: String,
    address: String,
    #[serde(default)]
    description: Option<String>,
    price: Money,
    #[serde(default)]
    category: Option<String>,
    status: String,
    #[serde(default)]
    image_url: Option<String>,
}

impl TryFrom<Record> for Property {
    type Error = Error;

    fn try_from(record: Record) -> Result<Self, Self::Error> {
        let Record {
            id,
            name,
            address,
            description,
            price,
            category,
            status,
            image_url,
        } = record;

        let image_url = image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .and_then(|url| {
                Url::parse(url)
                    .map_err(|e| {
                        log::debug!(
                            "ignoring `Property(id: {id})` image `{url}`: {e}",
                        );
                    })
                    .ok()
            });

        Ok(Self {
            id,
            name: text("name", &name, property::Name::new)?,
            address: text("address", &address, property::Address::new)?,
            description: optional_text(
                "description",
                description.as_deref(),
                property::Description::new,
            )?,
            price: non_negative("price", price)?,
            category: optional_text(
                "category",
                category.as_deref(),
                property::Category::new,
            )?
            .unwrap_or_default(),
            status: kind("status", &status)?,
            image_url,
        })
    }
}

/// Body of a new [`Property`] request.
#[derive(Debug, Serialize)]
struct NewRecord<'a> {
    name: &'a str,
    address: &'a str,
    price: Money,
    description: Option<&'a str>,
    category: &'a str,
    image_url: Option<&'a str>,
}

impl<'a> From<&'a property::Draft> for NewRecord<'a> {
    fn from(draft: &'a property::Draft) -> Self {
        Self {
            name: draft.name.as_ref(),
            address: draft.address.as_ref(),
            price: draft.price,
            description: draft.description.as_ref().map(AsRef::as_ref),
            category: draft.category.as_ref(),
            image_url: draft.image_url.as_ref().map(Url::as_str),
        }
    }
}

/// Query parameters of a [`Property`] list request.
#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<&'a str>,
}

impl<'a> From<&'a Filter> for ListQuery<'a> {
    fn from(filter: &'a Filter) -> Self {
        Self {
            category: filter.category.as_ref().map(AsRef::as_ref),
            min_price: filter.min_price,
            max_price: filter.max_price,
            keyword: filter
                .keyword
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty()),
        }
    }
}

impl Backend<Select<By<Vec<Property>, Filter>>> for Http {
    type Ok = Vec<Property>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Property>, Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        self.get::<Vec<Record>, _>("properties/", &ListQuery::from(&filter))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(validate)
            .collect()
    }
}

impl Backend<Select<By<Option<Property>, property::Id>>> for Http {
    type Ok = Option<Property>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        // Backend exposes no single `Property` endpoint.
        Ok(self
            .execute(Select(By::<Vec<Property>, _>::new(Filter::default())))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .find(|p| p.id == id))
    }
}

impl Backend<Insert<property::Draft>> for Http {
    type Ok = Property;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(draft): Insert<property::Draft>,
    ) -> Result<Self::Ok, Self::Err> {
        let record = self
            .send_json::<Record, _>(
                reqwest::Method::POST,
                "properties/",
                &NewRecord::from(&draft),
            )
            .await
            .map_err(tracerr::wrap!())?;
        validate(record).map_err(tracerr::wrap!())
    }
}

impl Backend<Delete<property::Id>> for Http {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<property::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        self.delete(&format!("properties/{id}"))
            .await
            .map_err(tracerr::wrap!())
    }
}
