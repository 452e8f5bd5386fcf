use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use bevy_isoledge_core::layer::Layer;

use crate::layers::{TiledLayerError, layers_from_map};

/// Compiler input read from a `.tmx` file.
#[derive(TypePath, Asset, Debug)]
pub struct TiledLayersAsset {
    pub layers: Vec<Layer>,
}

/// Asset loader turning `.tmx` maps into [`TiledLayersAsset`]s.
///
/// Only tile occupancy is read; tilesets and images referenced by the map
/// are not loaded.
#[derive(Default)]
pub struct TiledLayersLoader;

impl AssetLoader for TiledLayersLoader {
    type Asset = TiledLayersAsset;
    type Settings = ();
    type Error = TiledLayerError;

    fn load(
        &self,
        _reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            // tiled resolves external tilesets from the filesystem itself
            let full_path = std::path::Path::new("assets").join(load_context.asset_path().path());

            let map = tiled::Loader::new().load_tmx_map(&full_path)?;
            let layers = layers_from_map(&map)?;
            info!("Loaded {} tile layers from {:?}", layers.len(), full_path);
            Ok(TiledLayersAsset { layers })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tmx"]
    }
}
