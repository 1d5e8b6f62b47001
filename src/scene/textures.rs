//! Remote texture loading.
//!
//! Bodies are spawned with a placeholder material and their textures are
//! fetched and decoded on a background worker. A texture replaces the
//! placeholder when it arrives; a failed load leaves the placeholder in place.

use anyhow::{Context, Result};
use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use image::imageops::FilterType;
use image::{ImageReader, Limits};
use std::io::Cursor;
use std::sync::{
    Arc, Mutex,
    mpsc::{self, Receiver, Sender},
};
use std::thread;

/// Larger images are downscaled before upload
const MAX_TEXTURE_DIM: u32 = 4096;
/// Images wider or taller than this are rejected before decoding
const MAX_DECODE_DIM: u32 = 16_384;
/// Response bodies above this size are rejected
const MAX_TEXTURE_BYTES: u64 = 32 * 1024 * 1024;

/// Where a loaded texture ends up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureTarget {
    /// Replace the entity's `StandardMaterial` with a textured copy
    BodyMaterial(Entity),
    /// Show the image in a UI node
    UiImage(Entity),
}

#[derive(Debug)]
pub struct TextureRequest {
    pub target: TextureTarget,
    pub url: String,
}

/// RGBA8 pixels decoded off the main thread
#[derive(Debug)]
pub struct DecodedTexture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureTarget {
    /// Material textures are only sampled on the GPU; UI images keep a CPU
    /// copy because layout reads their size.
    pub fn asset_usage(&self) -> RenderAssetUsages {
        match self {
            TextureTarget::BodyMaterial(_) => RenderAssetUsages::RENDER_WORLD,
            TextureTarget::UiImage(_) => {
                RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD
            }
        }
    }
}

impl DecodedTexture {
    pub fn into_image(self, usage: RenderAssetUsages) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.rgba,
            TextureFormat::Rgba8UnormSrgb,
            usage,
        )
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

#[derive(Debug)]
pub enum TextureResult {
    Loaded {
        target: TextureTarget,
        texture: DecodedTexture,
    },
    Failed {
        target: TextureTarget,
        url: String,
        error: String,
    },
}

#[derive(Resource)]
pub struct TextureChannels {
    pub cmd_tx: Sender<TextureRequest>,
    pub res_rx: Arc<Mutex<Receiver<TextureResult>>>,
}

impl TextureChannels {
    /// Queue a texture load. A closed worker is logged and otherwise ignored.
    pub fn request(&self, target: TextureTarget, url: &str) {
        let req = TextureRequest {
            target,
            url: url.to_string(),
        };
        if let Err(err) = self.cmd_tx.send(req) {
            warn!("[TEXTURE] worker unavailable, keeping placeholder for {:?}: {}", target, err);
        }
    }
}

pub fn start_texture_worker() -> TextureChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<TextureRequest>();
    let (res_tx, res_rx) = mpsc::channel::<TextureResult>();

    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        rt.block_on(async move {
            let client = reqwest::Client::builder()
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default();

            while let Ok(TextureRequest { target, url }) = cmd_rx.recv() {
                let client = client.clone();
                let res_tx = res_tx.clone();
                tokio::spawn(async move {
                    let msg = match fetch_texture(&client, &url).await {
                        Ok(texture) => TextureResult::Loaded { target, texture },
                        Err(err) => TextureResult::Failed {
                            target,
                            url,
                            error: format!("{:#}", err),
                        },
                    };
                    let _ = res_tx.send(msg);
                });
            }
        });
    });

    TextureChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

async fn fetch_texture(client: &reqwest::Client, url: &str) -> Result<DecodedTexture> {
    let mut resp = client.get(url).send().await.context("request failed")?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("http {}", status);
    }
    check_content_length(resp.content_length())?;

    let mut bytes = Vec::new();
    while let Some(chunk) = resp.chunk().await.context("read response")? {
        bytes.extend_from_slice(&chunk);
        check_content_length(Some(bytes.len() as u64))?;
    }
    tokio::task::spawn_blocking(move || decode_texture(&bytes))
        .await
        .context("decode task")?
}

fn check_content_length(len: Option<u64>) -> Result<()> {
    match len {
        Some(len) if len > MAX_TEXTURE_BYTES => {
            anyhow::bail!("response too large: {} bytes (max {})", len, MAX_TEXTURE_BYTES)
        }
        _ => Ok(()),
    }
}

pub fn decode_texture(bytes: &[u8]) -> Result<DecodedTexture> {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DECODE_DIM);
    limits.max_image_height = Some(MAX_DECODE_DIM);

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("read image header")?;
    reader.limits(limits);
    let mut img = reader.decode().context("decode image")?;
    if img.width() > MAX_TEXTURE_DIM || img.height() > MAX_TEXTURE_DIM {
        img = img.resize(MAX_TEXTURE_DIM, MAX_TEXTURE_DIM, FilterType::Triangle);
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        anyhow::bail!("empty image");
    }
    Ok(DecodedTexture {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

pub fn setup_texture_worker(mut commands: Commands) {
    let channels = start_texture_worker();
    info!("[INIT] Texture worker started");
    commands.insert_resource(channels);
}

/// Drain finished loads and swap textures in
pub fn apply_texture_results(
    mut commands: Commands,
    channels: Option<Res<TextureChannels>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    textured: Query<(&MeshMaterial3d<StandardMaterial>, Option<&Name>)>,
    mut ui_nodes: Query<&mut Node>,
) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        match msg {
            TextureResult::Loaded {
                target: TextureTarget::BodyMaterial(entity),
                texture,
            } => {
                // Loads are never cancelled, so the body may be gone by now
                let Ok((current, name)) = textured.get(entity) else {
                    debug!("[TEXTURE] dropping texture for despawned entity {:?}", entity);
                    continue;
                };
                let mut material = materials.get(&current.0).cloned().unwrap_or_default();
                material.base_color = Color::WHITE;
                let usage = TextureTarget::BodyMaterial(entity).asset_usage();
                material.base_color_texture = Some(images.add(texture.into_image(usage)));
                commands
                    .entity(entity)
                    .insert(MeshMaterial3d(materials.add(material)));
                info!("[TEXTURE] applied texture to {}", display_name(name, entity));
            }
            TextureResult::Loaded {
                target: TextureTarget::UiImage(entity),
                texture,
            } => {
                let Ok(mut node) = ui_nodes.get_mut(entity) else {
                    debug!("[TEXTURE] dropping image for despawned node {:?}", entity);
                    continue;
                };
                node.aspect_ratio = Some(texture.aspect_ratio());
                node.display = Display::Flex;
                let usage = TextureTarget::UiImage(entity).asset_usage();
                commands
                    .entity(entity)
                    .insert(ImageNode::new(images.add(texture.into_image(usage))));
            }
            TextureResult::Failed { target, url, error } => {
                let who = match target {
                    TextureTarget::BodyMaterial(entity) => {
                        display_name(textured.get(entity).ok().and_then(|(_, n)| n), entity)
                    }
                    TextureTarget::UiImage(_) => "overlay image".to_string(),
                };
                warn!("[TEXTURE] load failed for {} ({}): {}", who, url, error);
            }
        }
    }
}

fn display_name(name: Option<&Name>, entity: Entity) -> String {
    name.map(|n| n.as_str().to_string())
        .unwrap_or_else(|| format!("{:?}", entity))
}
