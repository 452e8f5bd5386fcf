//! Systems that drive compilation.

use bevy::prelude::*;

use crate::compile::{CompiledWorld, compile_layers};
use crate::components::{CompileFailed, IsoWorldLayers, RecompileWorld};
use crate::events::{WorldCompileFailed, WorldCompiled};
use crate::plugin::IsoLedgeConfig;

/// Compile every world entity that has layers but no result yet, or that is
/// marked with [`RecompileWorld`].
pub fn compile_pending_worlds(
    mut commands: Commands,
    config: Res<IsoLedgeConfig>,
    worlds: Query<(
        Entity,
        &IsoWorldLayers,
        Has<CompiledWorld>,
        Has<CompileFailed>,
        Has<RecompileWorld>,
    )>,
) {
    let settings = config.settings();
    for (entity, layers, compiled, failed, recompile) in &worlds {
        if (compiled || failed) && !recompile {
            continue;
        }

        match compile_layers(layers.0.iter().cloned(), &settings) {
            Ok(world) => {
                commands
                    .entity(entity)
                    .remove::<(CompileFailed, RecompileWorld)>()
                    .insert(world);
                commands.entity(entity).trigger(|entity| WorldCompiled { entity });
            }
            Err(error) => {
                error!("World {:?} failed to compile: {}", entity, error);
                commands
                    .entity(entity)
                    .remove::<(CompiledWorld, RecompileWorld)>()
                    .insert(CompileFailed(error.clone()));
                commands
                    .entity(entity)
                    .trigger(move |entity| WorldCompileFailed { entity, error });
            }
        }
    }
}
