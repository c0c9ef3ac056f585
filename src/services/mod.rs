pub mod auth_service;
pub mod product_service;
pub mod store_service;

pub use auth_service::{AuthService, CredentialsDto, LoginResponse};
pub use product_service::{CreateProductDto, ProductService, UpdateProductDto};
pub use store_service::{CreateStoreDto, StoreService, UpdateStoreDto};
