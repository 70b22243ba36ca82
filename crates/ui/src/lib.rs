//! Server-rendered list and create/edit pages for cards.

pub mod handler;
pub mod state;
