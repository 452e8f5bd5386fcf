//! Compilation lifecycle events.
//!
//! Physics and rendering collaborators hook in by observing these instead of
//! polling for [`CompiledWorld`](crate::compile::CompiledWorld).

use bevy::prelude::*;

use crate::error::CompileError;

/// Fired once a world entity's [`CompiledWorld`](crate::compile::CompiledWorld)
/// has been inserted.
///
/// This is an `EntityEvent` that can be observed on the world entity or
/// globally.
///
/// # Example
///
/// ```ignore
/// app.add_observer(|trigger: On<WorldCompiled>, worlds: Query<&CompiledWorld>| {
///     let world = worlds.get(trigger.event().entity).unwrap();
///     info!("{} ledge groups ready", world.ledges.ledge_count());
/// });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct WorldCompiled {
    /// The world entity
    #[event_target]
    pub entity: Entity,
}

/// Fired when compiling a world entity's layers failed.
///
/// No geometry is produced for the entity until it is marked with
/// [`RecompileWorld`](crate::components::RecompileWorld).
#[derive(EntityEvent, Debug, Clone)]
pub struct WorldCompileFailed {
    /// The world entity
    #[event_target]
    pub entity: Entity,
    pub error: CompileError,
}
