//! Typed client for the breeder API resources.
//!
//! # Design
//! `KennelApi` owns a `RequestGateway` and adds nothing but paths, payload
//! types and response shapes. All status handling and error normalization
//! happen in the gateway.

use serde::Deserialize;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::gateway::{RequestGateway, RequestOptions};
use crate::http::HttpMethod;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Litter, LitterUpdate, NewLitter, NewPuppy, Puppy, PuppyUpdate};

/// List responses come either bare or wrapped, depending on the backend.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Bare(Vec<T>),
    Data { data: Vec<T> },
    Puppies { puppies: Vec<T> },
    Litters { litters: Vec<T> },
}

impl<T> Listing<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items)
            | Listing::Data { data: items }
            | Listing::Puppies { puppies: items }
            | Listing::Litters { litters: items } => items,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KennelApi<T = UreqTransport> {
    gateway: RequestGateway<T>,
}

impl<T: Transport> KennelApi<T> {
    pub fn new(gateway: RequestGateway<T>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &RequestGateway<T> {
        &self.gateway
    }

    pub fn list_puppies(&self) -> Result<Vec<Puppy>, GatewayError<T::Error>> {
        let listing: Listing<Puppy> = self.gateway.request_json("/puppies", RequestOptions::get())?;
        Ok(listing.into_items())
    }

    pub fn get_puppy(&self, id: Uuid) -> Result<Puppy, GatewayError<T::Error>> {
        self.gateway
            .request_json(&format!("/puppies/{id}"), RequestOptions::get())
    }

    pub fn create_puppy(&self, input: &NewPuppy) -> Result<Puppy, GatewayError<T::Error>> {
        self.gateway.send_json(HttpMethod::Post, "/puppies", input)
    }

    pub fn update_puppy(
        &self,
        id: Uuid,
        input: &PuppyUpdate,
    ) -> Result<Puppy, GatewayError<T::Error>> {
        self.gateway
            .send_json(HttpMethod::Put, &format!("/puppies/{id}"), input)
    }

    pub fn delete_puppy(&self, id: Uuid) -> Result<(), GatewayError<T::Error>> {
        self.gateway
            .request(&format!("/puppies/{id}"), RequestOptions::delete())?;
        Ok(())
    }

    pub fn list_litters(&self) -> Result<Vec<Litter>, GatewayError<T::Error>> {
        let listing: Listing<Litter> = self.gateway.request_json("/litters", RequestOptions::get())?;
        Ok(listing.into_items())
    }

    pub fn get_litter(&self, id: Uuid) -> Result<Litter, GatewayError<T::Error>> {
        self.gateway
            .request_json(&format!("/litters/{id}"), RequestOptions::get())
    }

    pub fn create_litter(&self, input: &NewLitter) -> Result<Litter, GatewayError<T::Error>> {
        self.gateway.send_json(HttpMethod::Post, "/litters", input)
    }

    pub fn update_litter(
        &self,
        id: Uuid,
        input: &LitterUpdate,
    ) -> Result<Litter, GatewayError<T::Error>> {
        self.gateway
            .send_json(HttpMethod::Put, &format!("/litters/{id}"), input)
    }

    pub fn delete_litter(&self, id: Uuid) -> Result<(), GatewayError<T::Error>> {
        self.gateway
            .request(&format!("/litters/{id}"), RequestOptions::delete())?;
        Ok(())
    }
}
