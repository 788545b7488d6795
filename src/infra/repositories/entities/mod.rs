//! SeaORM entity definitions for the three relations.

pub mod contact;
pub mod group;
pub mod group_member;
