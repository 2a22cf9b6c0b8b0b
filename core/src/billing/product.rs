use super::resource::{Resource, ResourceKind};
use crate::types::{CreateProduct, Product, ProductFilters, UpdateProduct};

/// `billing/product`, addressed by `product_id`.
#[derive(Debug, Clone, Copy)]
pub struct Products;

impl ResourceKind for Products {
    const SEGMENT: &'static str = "product";
    const ID_FIELD: &'static str = "product_id";

    type Entity = Product;
    type Create = CreateProduct;
    type Update = UpdateProduct;
    type Filters = ProductFilters;
}

pub type ProductResource<'a, T> = Resource<'a, Products, T>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::BillingOptions;
    use crate::config::{Config, ConjoinOptions};
    use crate::dispatcher::Dispatcher;
    use crate::test_support::StubTransport;
    use crate::types::PageParams;

    const PRODUCTS: &str = r#"{"response":{"type":"SUCCESS","code":200,"message":"OK"},
        "data":[{"product_id":"prod_1","name":"Pro","unit_label":"seat","is_active":true}],
        "query":{"total_count":1}}"#;

    #[tokio::test]
    async fn list_page_filters_active_products() {
        let options = ConjoinOptions::default().dangerously_set_api_uri("https://api.test");
        let d = Dispatcher::new(Config::new("sk_test", options), StubTransport::new(200, PRODUCTS));
        let filters = ProductFilters {
            is_active: Some(true),
            page: PageParams {
                limit: Some(5),
                ..PageParams::default()
            },
            ..ProductFilters::default()
        };

        let page = ProductResource::new(&d)
            .list_page(&filters, &BillingOptions::new("p1", "e1"))
            .await
            .unwrap();
        assert_eq!(page.total_count(), Some(1));
        assert_eq!(page.data[0].unit_label, "seat");
        assert!(page.data[0].features.is_empty());

        let req = d.transport().last_request();
        assert_eq!(req.url, "https://api.test/v1/billing/product/p1/e1?is_active=true&limit=5");
        assert!(req.body.is_none());
    }
}
