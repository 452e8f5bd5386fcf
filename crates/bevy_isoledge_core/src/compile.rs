//! The one-shot compilation pipeline.

use bevy::prelude::*;

use crate::error::CompileError;
use crate::layer::{LayerStack, TileOccupancy};
use crate::ledge::{DropBelow, FrontOcclusion, LedgeClassifier, LedgeData, LedgeSuperimposer};
use crate::perimeter::{PerimeterCompiler, PerimeterData};

/// Tunables for the classification and occlusion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileSettings {
    /// How many layers below an edge are searched for a landing tile.
    pub drop_depth: u32,
    /// Whether tiles diagonally in front of a ledge also occlude it.
    pub occlude_diagonals: bool,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            drop_depth: 1,
            occlude_diagonals: false,
        }
    }
}

/// Everything the compiler produced for one world load.
///
/// Inserted on the world entity once compilation succeeds.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompiledWorld {
    pub stack: LayerStack,
    pub perimeter: PerimeterData,
    pub ledges: LedgeData,
}

/// Run PerimeterCompiler, LedgeClassifier and LedgeSuperimposer in order.
pub fn compile(stack: LayerStack, settings: &CompileSettings) -> Result<CompiledWorld, CompileError> {
    let perimeter = PerimeterCompiler.compile(&stack)?;

    let classifier = LedgeClassifier::new(DropBelow {
        depth: settings.drop_depth,
    });
    let raw = classifier.classify(&stack, &perimeter)?;

    let superimposer = LedgeSuperimposer::new(FrontOcclusion {
        include_diagonals: settings.occlude_diagonals,
    });
    let ledges = superimposer.superimpose(&stack, raw);

    info!(
        "Compiled {} layers: {} tile groups, {} ledge groups, {} superimposed copies",
        stack.len(),
        perimeter.iter_tile_groups().count(),
        ledges.ledge_count(),
        ledges.superimposed_count()
    );

    Ok(CompiledWorld {
        stack,
        perimeter,
        ledges,
    })
}

/// Validate raw layers into a stack, then [`compile`] it.
pub fn compile_layers<T: TileOccupancy>(
    layers: impl IntoIterator<Item = T>,
    settings: &CompileSettings,
) -> Result<CompiledWorld, CompileError> {
    let stack = LayerStack::build(layers)?;
    compile(stack, settings)
}
