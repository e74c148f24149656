//! Test support.


pub(crate) use memory::MemoryProductsStore;

use crate::products::models::Product;

pub(crate) fn widget() -> Product {
    Product::new("widget", "a thing")
}
