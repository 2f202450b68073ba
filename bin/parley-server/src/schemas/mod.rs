//! Request / response wire types.

pub mod chat;
pub mod document;
