use super::resource::{Resource, ResourceKind};
use crate::types::{CreatePrice, Price, PriceFilters, UpdatePrice};

/// `billing/price`, addressed by `price_id`.
#[derive(Debug, Clone, Copy)]
pub struct Prices;

impl ResourceKind for Prices {
    const SEGMENT: &'static str = "price";
    const ID_FIELD: &'static str = "price_id";

    type Entity = Price;
    type Create = CreatePrice;
    type Update = UpdatePrice;
    type Filters = PriceFilters;
}

pub type PriceResource<'a, T> = Resource<'a, Prices, T>;
