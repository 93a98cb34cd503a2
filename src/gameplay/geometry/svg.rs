//! SVG-traced static obstacles.
//!
//! `svg/<name>.svg` is loaded through the asset server as an `SvgOutline`
//! (every `<path d=...>` flattened into rings). The document is read with
//! roxmltree; the path data goes through `path::flatten_path_data`. The scene spawns an
//! `SvgObstacleRequest`; once the outline is ready the request is replaced by
//! a static polygon body centred on the requested point. A failed load leaves
//! the obstacle absent.
use std::fmt;

use bevy::asset::{io::Reader, AssetLoader, LoadContext, LoadState};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::coords::PlayfieldFrame;

use super::path::{flatten_path_data, PathError};
use super::shapes::{polygon, OBSTACLE_FILL};
use super::spawn::spawn_static_body;

#[derive(Debug)]
pub enum SvgLoadError {
    Io(std::io::Error),
    Utf8(std::str::Utf8Error),
    Xml(roxmltree::Error),
    Path(PathError),
    NoContours,
}

impl fmt::Display for SvgLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvgLoadError::Io(e) => write!(f, "could not read svg: {e}"),
            SvgLoadError::Utf8(e) => write!(f, "svg is not valid utf-8: {e}"),
            SvgLoadError::Xml(e) => write!(f, "svg is not well-formed xml: {e}"),
            SvgLoadError::Path(e) => write!(f, "bad path data: {e}"),
            SvgLoadError::NoContours => f.write_str("svg contains no usable <path> contours"),
        }
    }
}

impl std::error::Error for SvgLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SvgLoadError::Io(e) => Some(e),
            SvgLoadError::Utf8(e) => Some(e),
            SvgLoadError::Xml(e) => Some(e),
            SvgLoadError::Path(e) => Some(e),
            SvgLoadError::NoContours => None,
        }
    }
}

impl From<std::io::Error> for SvgLoadError {
    fn from(e: std::io::Error) -> Self {
        SvgLoadError::Io(e)
    }
}

impl From<std::str::Utf8Error> for SvgLoadError {
    fn from(e: std::str::Utf8Error) -> Self {
        SvgLoadError::Utf8(e)
    }
}

impl From<roxmltree::Error> for SvgLoadError {
    fn from(e: roxmltree::Error) -> Self {
        SvgLoadError::Xml(e)
    }
}

impl From<PathError> for SvgLoadError {
    fn from(e: PathError) -> Self {
        SvgLoadError::Path(e)
    }
}

/// The `d` attribute of every `<path>` element, in document order.
pub fn extract_path_data(svg: &str) -> Result<Vec<String>, SvgLoadError> {
    let doc = roxmltree::Document::parse(svg)?;
    Ok(doc
        .descendants()
        .filter(|n| n.has_tag_name("path"))
        .filter_map(|n| n.attribute("d"))
        .map(str::to_owned)
        .collect())
}

/// Flattened outline of an SVG document, in the document's (y down) space.
#[derive(Asset, TypePath, Debug, Clone, PartialEq)]
pub struct SvgOutline {
    pub rings: Vec<Vec<Vec2>>,
}

impl SvgOutline {
    pub fn from_svg_str(svg: &str, tolerance: f32) -> Result<Self, SvgLoadError> {
        let mut rings = Vec::new();
        for d in extract_path_data(svg)? {
            rings.extend(flatten_path_data(&d, tolerance)?);
        }
        if rings.is_empty() {
            return Err(SvgLoadError::NoContours);
        }
        Ok(Self { rings })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SvgOutlineSettings {
    pub tolerance: f32,
}

impl Default for SvgOutlineSettings {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

#[derive(Default)]
pub struct SvgOutlineLoader;

impl AssetLoader for SvgOutlineLoader {
    type Asset = SvgOutline;
    type Settings = SvgOutlineSettings;
    type Error = SvgLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let text = std::str::from_utf8(&bytes)?;
        SvgOutline::from_svg_str(text, settings.tolerance)
    }

    fn extensions(&self) -> &[&str] {
        &["svg"]
    }
}

/// Pending decorative obstacle; replaced by a static body once its outline loads.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SvgObstacleRequest {
    pub name: String,
    /// Playfield point the outline's area centroid is placed on.
    pub position: Vec2,
    pub tolerance: f32,
}

impl SvgObstacleRequest {
    pub fn asset_path(&self) -> String {
        format!("svg/{}.svg", self.name)
    }
}

#[derive(Component, Debug)]
pub struct PendingSvg(pub Handle<SvgOutline>);

pub struct SvgObstaclePlugin;

impl Plugin for SvgObstaclePlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<SvgOutline>()
            .init_asset_loader::<SvgOutlineLoader>()
            .add_systems(Update, (begin_svg_loads, finish_svg_loads).chain());
    }
}

fn begin_svg_loads(
    mut commands: Commands,
    server: Res<AssetServer>,
    requests: Query<(Entity, &SvgObstacleRequest), Without<PendingSvg>>,
) {
    for (entity, req) in &requests {
        let tolerance = req.tolerance;
        let handle: Handle<SvgOutline> = server.load_with_settings(
            req.asset_path(),
            move |s: &mut SvgOutlineSettings| s.tolerance = tolerance,
        );
        debug!(target = "svg", path = %req.asset_path(), "loading outline");
        commands.entity(entity).insert(PendingSvg(handle));
    }
}

fn finish_svg_loads(
    mut commands: Commands,
    server: Res<AssetServer>,
    outlines: Res<Assets<SvgOutline>>,
    frame: Res<PlayfieldFrame>,
    pending: Query<(Entity, &SvgObstacleRequest, &PendingSvg)>,
) {
    for (entity, req, PendingSvg(handle)) in &pending {
        if let Some(outline) = outlines.get(handle) {
            let spec = polygon(
                req.position.x,
                req.position.y,
                outline.rings.clone(),
                OBSTACLE_FILL,
            );
            match spawn_static_body(&mut commands, &spec, &frame) {
                Some(body) => info!(
                    target = "svg",
                    name = %req.name,
                    rings = outline.rings.len(),
                    ?body,
                    "svg obstacle added"
                ),
                None => warn!(target = "svg", name = %req.name, "svg outline produced no collider"),
            }
            commands.entity(entity).despawn();
        } else if let LoadState::Failed(err) = server.load_state(handle) {
            warn!(target = "svg", name = %req.name, "svg obstacle skipped: {err}");
            commands.entity(entity).despawn();
        }
    }
}
