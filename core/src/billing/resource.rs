//! The CRUD shape shared by every billing resource.
//!
//! # Design
//! A resource is described by a zero-sized `ResourceKind`: its path segment,
//! the query key that addresses a single record, and the payload types.
//! `Resource` turns each operation into a path, verb, query and body and
//! hands it to the dispatcher. No validation happens here; the service
//! rejects bad input.
//!
//! Addressing is deliberately asymmetric and matches the service's routing:
//! `get` and `update` pass the id as a query parameter, while `archive` and
//! `restore` put it in the path.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::BillingOptions;
use crate::dispatcher::{Dispatcher, RequestOptions};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::transport::Transport;

pub trait ResourceKind {
    /// Path segment after `billing/`.
    const SEGMENT: &'static str;
    /// Query parameter carrying the record id.
    const ID_FIELD: &'static str;

    type Entity: DeserializeOwned + Send;
    type Create: Serialize + Sync;
    type Update: Serialize + Sync;
    type Filters: Serialize + Sync;
}

pub struct Resource<'a, K, T> {
    dispatcher: &'a Dispatcher<T>,
    kind: PhantomData<fn() -> K>,
}

impl<K, T> Clone for Resource<'_, K, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, T> Copy for Resource<'_, K, T> {}

impl<'a, K: ResourceKind, T: Transport> Resource<'a, K, T> {
    pub(crate) fn new(dispatcher: &'a Dispatcher<T>) -> Self {
        Self {
            dispatcher,
            kind: PhantomData,
        }
    }

    /// `billing/{segment}/{project}/{entity}`
    pub fn base_path(options: &BillingOptions) -> String {
        format!(
            "billing/{}/{}/{}",
            K::SEGMENT,
            options.project_id,
            options.entity_id
        )
    }

    fn action_path(id: &str, action: &str, options: &BillingOptions) -> String {
        format!("{}/{id}/{action}", Self::base_path(options))
    }

    pub async fn create(&self, data: &K::Create, options: &BillingOptions) -> Result<K::Entity> {
        let request = RequestOptions::post().body(data)?;
        self.dispatcher
            .fetch_data(&Self::base_path(options), request)
            .await
    }

    pub async fn get(&self, id: &str, options: &BillingOptions) -> Result<K::Entity> {
        let request = RequestOptions::get().query_param(K::ID_FIELD, id);
        self.dispatcher
            .fetch_data(&Self::base_path(options), request)
            .await
    }

    pub async fn list(
        &self,
        filters: &K::Filters,
        options: &BillingOptions,
    ) -> Result<Vec<K::Entity>> {
        let request = RequestOptions::get().query(filters)?;
        self.dispatcher
            .fetch_data(&Self::base_path(options), request)
            .await
    }

    /// Like `list`, but keeps the pagination block so the caller can
    /// request the next page.
    pub async fn list_page(
        &self,
        filters: &K::Filters,
        options: &BillingOptions,
    ) -> Result<Envelope<Vec<K::Entity>>> {
        let request = RequestOptions::get().query(filters)?;
        self.dispatcher
            .fetch_envelope(&Self::base_path(options), request)
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        data: &K::Update,
        options: &BillingOptions,
    ) -> Result<K::Entity> {
        let request = RequestOptions::patch()
            .body(data)?
            .query_param(K::ID_FIELD, id);
        self.dispatcher
            .fetch_data(&Self::base_path(options), request)
            .await
    }

    pub async fn archive(&self, id: &str, options: &BillingOptions) -> Result<K::Entity> {
        self.dispatcher
            .fetch_data(
                &Self::action_path(id, "archive", options),
                RequestOptions::patch(),
            )
            .await
    }

    pub async fn restore(&self, id: &str, options: &BillingOptions) -> Result<K::Entity> {
        self.dispatcher
            .fetch_data(
                &Self::action_path(id, "restore", options),
                RequestOptions::patch(),
            )
            .await
    }
}
