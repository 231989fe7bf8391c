//! Categories: system defaults shared by everyone plus the ones each user creates.

mod domain;
mod endpoints;
mod service;

pub use domain::{Category, CategoryForm, CategoryName, DEFAULT_CATEGORY_ICON, NewCategory};
pub use endpoints::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use service::CategoryService;
