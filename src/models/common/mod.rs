pub mod pagination;
pub mod response;
pub mod str_enum;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery, page_params};
pub use response::ApiResponse;
