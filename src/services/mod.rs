// Link manager services
// Services hold the domain rules: group and bookmark lifecycles, search, page assembly.

pub mod bookmark_service;
pub mod group_service;
pub mod page_assembler;
pub mod search_aggregator;
