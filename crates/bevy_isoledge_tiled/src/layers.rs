//! Conversion of Tiled tile layers into compiler layers.

use std::path::Path;

use bevy::prelude::*;
use bevy_isoledge_core::error::LayerStackError;
use bevy_isoledge_core::layer::{Layer, LayerStack, TileOccupancy};
use thiserror::Error;
use tiled::{FiniteTileLayer, LayerType, PropertyValue, TileLayer};

/// Custom layer property holding an explicit Z-index.
pub const Z_INDEX_PROPERTY: &str = "z_index";

#[derive(Debug, Error)]
pub enum TiledLayerError {
    #[error("Failed to load map: {0}")]
    Tiled(#[from] tiled::Error),

    #[error("Layer '{0}' is infinite; only finite tile layers are supported")]
    InfiniteLayer(String),

    #[error("Layer '{layer}' has a `z_index` property that is not a non-negative integer: {value}")]
    InvalidZIndex { layer: String, value: String },

    #[error("Invalid layer stack: {0}")]
    Stack(#[from] LayerStackError),
}

/// A finite Tiled tile layer seen as an occupancy grid.
///
/// Any non-empty tile counts as occupied.
pub struct TiledTiles<'map> {
    tiles: FiniteTileLayer<'map>,
    name: &'map str,
    z_index: u32,
}

impl TileOccupancy for TiledTiles<'_> {
    fn z_index(&self) -> u32 {
        self.z_index
    }

    fn size(&self) -> UVec2 {
        UVec2::new(self.tiles.width(), self.tiles.height())
    }

    fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.tiles.get_tile(x as i32, y as i32).is_some()
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// Read the `z_index` property of a layer, if set.
pub fn z_index_property(
    layer: &str,
    properties: &tiled::Properties,
) -> Result<Option<u32>, TiledLayerError> {
    let Some(value) = properties.get(Z_INDEX_PROPERTY) else {
        return Ok(None);
    };
    match value {
        PropertyValue::IntValue(z) if *z >= 0 => Ok(Some(*z as u32)),
        other => Err(TiledLayerError::InvalidZIndex {
            layer: layer.to_string(),
            value: format!("{other:?}"),
        }),
    }
}

/// Every visible tile layer of a map, in document order.
///
/// Group layers are flattened and hidden layers (or hidden groups) are
/// skipped. A layer's Z-index is its `z_index` property, falling back to its
/// position among the collected tile layers.
pub fn layers_from_map(map: &tiled::Map) -> Result<Vec<Layer>, TiledLayerError> {
    let mut layers = Vec::new();
    for layer in map.layers() {
        collect_layer(layer, &mut layers)?;
    }
    debug!("Read {} tile layers from map", layers.len());
    Ok(layers)
}

fn collect_layer(layer: tiled::Layer<'_>, layers: &mut Vec<Layer>) -> Result<(), TiledLayerError> {
    if !layer.visible {
        return Ok(());
    }

    match layer.layer_type() {
        LayerType::Tiles(TileLayer::Finite(tiles)) => {
            let fallback = layers.len() as u32;
            let z_index = z_index_property(&layer.name, &layer.properties)?.unwrap_or(fallback);
            layers.push(Layer::from_occupancy(&TiledTiles {
                tiles,
                name: &layer.name,
                z_index,
            }));
        }
        LayerType::Tiles(TileLayer::Infinite(_)) => {
            return Err(TiledLayerError::InfiniteLayer(layer.name.clone()));
        }
        LayerType::Group(group) => {
            for child in group.layers() {
                collect_layer(child, layers)?;
            }
        }
        LayerType::Objects(_) | LayerType::Image(_) => {}
    }
    Ok(())
}

/// Parse a `.tmx` file and read its tile layers.
pub fn load_layers(path: impl AsRef<Path>) -> Result<Vec<Layer>, TiledLayerError> {
    let map = tiled::Loader::new().load_tmx_map(path)?;
    layers_from_map(&map)
}

/// Parse a `.tmx` file straight into a validated stack.
pub fn load_stack(path: impl AsRef<Path>) -> Result<LayerStack, TiledLayerError> {
    Ok(LayerStack::build(load_layers(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="isometric" renderorder="right-down" width="3" height="2" tilewidth="64" tileheight="32" infinite="0" nextlayerid="5" nextobjectid="1">
 <tileset firstgid="1" name="blocks" tilewidth="64" tileheight="32" tilecount="1" columns="1">
  <image source="blocks.png" width="64" height="32"/>
 </tileset>
 <layer id="1" name="ground" width="3" height="2">
  <data encoding="csv">
1,1,1,
1,1,0
</data>
 </layer>
 <group id="2" name="upper">
  <layer id="3" name="roof" width="3" height="2">
   <properties>
    <property name="z_index" type="int" value="1"/>
   </properties>
   <data encoding="csv">
0,1,0,
0,0,0
</data>
  </layer>
 </group>
 <layer id="4" name="hidden" width="3" height="2" visible="0">
  <data encoding="csv">
1,0,0,
0,0,0
</data>
 </layer>
</map>
"#;

    fn write_map(name: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.tmx", name, std::process::id()));
        std::fs::write(&path, MAP).unwrap();
        path
    }

    #[test]
    fn test_z_index_property() {
        let mut properties = tiled::Properties::new();
        assert_eq!(z_index_property("a", &properties).unwrap(), None);

        properties.insert(Z_INDEX_PROPERTY.to_string(), PropertyValue::IntValue(3));
        assert_eq!(z_index_property("a", &properties).unwrap(), Some(3));

        properties.insert(Z_INDEX_PROPERTY.to_string(), PropertyValue::IntValue(-1));
        assert!(matches!(
            z_index_property("a", &properties),
            Err(TiledLayerError::InvalidZIndex { .. })
        ));

        properties.insert(
            Z_INDEX_PROPERTY.to_string(),
            PropertyValue::StringValue("top".to_string()),
        );
        assert!(matches!(
            z_index_property("a", &properties),
            Err(TiledLayerError::InvalidZIndex { layer, .. }) if layer == "a"
        ));
    }

    #[test]
    fn test_load_layers_flattens_groups_and_skips_hidden() {
        let path = write_map("isoledge_layers");
        let layers = load_layers(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].name(), "ground");
        assert_eq!(layers[0].z_index(), 0);
        assert_eq!(layers[0].occupied_count(), 5);
        assert_eq!(layers[1].name(), "roof");
        assert_eq!(layers[1].z_index(), 1);
        assert!(layers[1].is_occupied_at(IVec2::new(1, 0)));
    }

    #[test]
    fn test_load_stack() {
        let path = write_map("isoledge_stack");
        let stack = load_stack(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.last().name(), "roof");
    }

    #[test]
    fn test_missing_file_is_a_tiled_error() {
        let err = load_layers("definitely/not/here.tmx").unwrap_err();
        assert!(matches!(err, TiledLayerError::Tiled(_)));
    }
}
