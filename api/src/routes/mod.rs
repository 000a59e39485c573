pub mod health_route;
pub mod reindex_route;
pub mod root_route;

pub mod query {
    pub mod query_request;
    pub mod query_route;
}
