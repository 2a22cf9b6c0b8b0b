use super::resource::{Resource, ResourceKind};
use crate::types::{CreateCustomer, Customer, CustomerFilters, UpdateCustomer};

/// `billing/customer`, addressed by `customer_id`.
#[derive(Debug, Clone, Copy)]
pub struct Customers;

impl ResourceKind for Customers {
    const SEGMENT: &'static str = "customer";
    const ID_FIELD: &'static str = "customer_id";

    type Entity = Customer;
    type Create = CreateCustomer;
    type Update = UpdateCustomer;
    type Filters = CustomerFilters;
}

pub type CustomerResource<'a, T> = Resource<'a, Customers, T>;
