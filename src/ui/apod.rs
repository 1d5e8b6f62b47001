//! Astronomy Picture of the Day panel

use bevy::prelude::*;

use crate::nasa::{Apod, NasaData};
use crate::scene::{TextureChannels, TextureTarget};
use crate::ui::{PANEL_BACKGROUND, PANEL_MAX_WIDTH, PANEL_MARGIN, PANEL_PADDING};

/// Description characters kept before the ellipsis
pub const APOD_DESCRIPTION_CHARS: usize = 200;

#[derive(Component)]
pub struct ApodPanel;

#[derive(Component)]
pub struct ApodImage;

/// Display text for the picture of the day
#[derive(Clone, Debug, PartialEq)]
pub struct ApodView {
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub date_line: String,
    pub attribution: Option<String>,
    /// Videos have no decodable image at `image_url`
    pub has_image: bool,
}

impl ApodView {
    pub fn from_apod(apod: &Apod) -> Self {
        let attribution = apod
            .copyright
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!("© {c}"));

        Self {
            title: apod.title.clone(),
            image_url: apod.url.clone(),
            description: truncate_with_ellipsis(&apod.explanation, APOD_DESCRIPTION_CHARS),
            date_line: format!("Date: {}", apod.date),
            attribution,
            has_image: apod.media_type.as_deref() != Some("video"),
        }
    }
}

/// First `max` characters followed by `...`
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

/// Spawn the panel the first time an APOD is available
pub fn spawn_apod_panel(
    mut commands: Commands,
    data: Res<NasaData>,
    textures: Option<Res<TextureChannels>>,
    existing: Query<(), With<ApodPanel>>,
) {
    if !data.is_changed() || !existing.is_empty() {
        return;
    }
    let Some(apod) = data.apod.as_ref() else {
        return;
    };
    let view = ApodView::from_apod(apod);

    let mut image = None;
    commands
        .spawn((
            ApodPanel,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PANEL_MARGIN),
                top: Val::Px(PANEL_MARGIN),
                max_width: Val::Px(PANEL_MAX_WIDTH),
                padding: UiRect::all(Val::Px(PANEL_PADDING)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            Name::new("APOD panel"),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("NASA Picture of the Day"),
                TextFont::from_font_size(18.0),
                TextColor(Color::WHITE),
            ));
            panel.spawn((
                Text::new(view.title.clone()),
                TextFont::from_font_size(15.0),
                TextColor(Color::WHITE),
            ));
            // Hidden until the texture worker delivers the image
            image = Some(
                panel
                    .spawn((
                        ApodImage,
                        Node {
                            width: Val::Percent(100.0),
                            display: Display::None,
                            ..default()
                        },
                    ))
                    .id(),
            );
            panel.spawn((
                Text::new(view.description.clone()),
                TextFont::from_font_size(12.0),
                TextColor(Color::WHITE),
            ));
            panel.spawn((
                Text::new(view.date_line.clone()),
                TextFont::from_font_size(11.0),
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));
            if let Some(attribution) = &view.attribution {
                panel.spawn((
                    Text::new(attribution.clone()),
                    TextFont::from_font_size(11.0),
                    TextColor(Color::srgb(0.8, 0.8, 0.8)),
                ));
            }
        });

    info!("[NASA] Showing picture of the day: {}", view.title);

    match (image, textures, view.has_image) {
        (Some(image), Some(textures), true) => {
            textures.request(TextureTarget::UiImage(image), &view.image_url)
        }
        (_, _, false) => debug!("[NASA] picture of the day is not an image, skipping"),
        _ => warn!("[TEXTURE] no texture worker for the picture of the day"),
    }
}
