//! Components on a world entity.

use bevy::prelude::*;

use crate::error::CompileError;
use crate::layer::Layer;

/// The raw layers of one world, in any order.
///
/// Spawning an entity with this component requests compilation; the result
/// lands on the same entity as a [`CompiledWorld`](crate::compile::CompiledWorld).
#[derive(Component, Debug, Clone, Default)]
pub struct IsoWorldLayers(pub Vec<Layer>);

/// Present after compiling the world's layers failed.
#[derive(Component, Debug, Clone)]
pub struct CompileFailed(pub CompileError);

/// Marker that discards the previous result and compiles the world again.
///
/// Insert it after replacing [`IsoWorldLayers`] to reload a world. Removed
/// once the new compilation has run.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct RecompileWorld;
