// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod confirm;
pub mod gateway;
pub mod ids;
pub mod model;
pub mod query;
pub mod scroll;
pub mod state;
pub mod theme;

pub use confirm::*;
pub use gateway::*;
pub use ids::*;
pub use model::*;
pub use query::*;
pub use scroll::*;
pub use state::*;
pub use theme::*;
