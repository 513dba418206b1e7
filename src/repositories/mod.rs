// src/repositories/mod.rs
//
// Store gateway layer
//
// CRITICAL RULES:
// - The gateway is a dumb data mapper
// - NO business logic
// - NO invariant enforcement
// - Statement text comes from the query builder only

pub mod gateway;

pub use gateway::{
    count_on, delete_by_id_on, exists_on, get_all_on, get_by_id_on, get_filtered_on, insert_on,
    update_on, StoreGateway,
};
