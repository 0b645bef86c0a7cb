//! 2D overlay: text slots, intro crawl, stamina bar and the end-of-game dim.
//!
//! ## Layout
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ HEALTH: 100                       TIME: 61 │
//! │                                            │
//! │            WAR OF THE SPHERES              │  ← Title / Banner
//! │          You defended the planet!          │  ← Subtitle
//! │                                            │
//! │           Press SPACE to skip              │  ← Hint
//! │ [██████████░░]                             │  ← stamina
//! └────────────────────────────────────────────┘
//! ```
//!
//! Every node is spawned once at startup and hidden when the current
//! [`DrawList`] does not mention it.

use crate::config::GameConfig;
use crate::game::GameSet;
use crate::render::{stamina_bar_color, BarSlot, DrawList, HudSlot, CRAWL_COLOR};
use bevy::prelude::*;

const STAMINA_BAR_WIDTH: f32 = 200.0;
const STAMINA_BAR_HEIGHT: f32 = 15.0;
const STAMINA_BAR_PADDING: f32 = 30.0;

fn bar_background() -> Color {
    Color::srgba(0.2, 0.2, 0.2, 0.8)
}

// ── Component markers ─────────────────────────────────────────────────────────

/// A text node bound to one [`HudSlot`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudText(pub HudSlot);

/// Column holding every crawl line; moved by its `bottom` offset.
#[derive(Component)]
pub struct CrawlRoot;

#[derive(Component)]
pub struct StaminaBarRoot(pub BarSlot);

#[derive(Component)]
pub struct StaminaBarFill(pub BarSlot);

/// Full-screen dimming layer.
#[derive(Component)]
pub struct HudOverlay;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud).add_systems(
            Update,
            (sync_overlay, sync_hud_text, sync_crawl, sync_bars).in_set(GameSet::Present),
        );
    }
}

// ── Pure helpers ──────────────────────────────────────────────────────────────

fn font_size(slot: HudSlot) -> f32 {
    match slot {
        HudSlot::Title | HudSlot::Banner => 96.0,
        HudSlot::Score | HudSlot::Timer | HudSlot::Subtitle => 32.0,
        HudSlot::Hint => 24.0,
    }
}

/// `bottom` of the crawl column for a scroll offset.
///
/// The column starts fully below the viewport and rises with the offset.
#[inline]
pub fn crawl_bottom(offset: f32, block_height: f32) -> f32 {
    offset - block_height
}

/// Fill width as a percentage of the bar.
#[inline]
pub fn bar_fill_percent(current: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (current / max).clamp(0.0, 1.0) * 100.0
}

fn set_visible(visibility: &mut Visibility, visible: bool) {
    let wanted = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    if *visibility != wanted {
        *visibility = wanted;
    }
}

/// Absolute placement for a slot's container.
fn slot_node(slot: HudSlot) -> Node {
    let centred_row = |top: Val| Node {
        position_type: PositionType::Absolute,
        width: Val::Percent(100.0),
        top,
        justify_content: JustifyContent::Center,
        ..default()
    };
    match slot {
        HudSlot::Score => Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        HudSlot::Timer => Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        HudSlot::Title => centred_row(Val::Percent(40.0)),
        HudSlot::Banner => centred_row(Val::Percent(36.0)),
        HudSlot::Subtitle => centred_row(Val::Percent(52.0)),
        HudSlot::Hint => centred_row(Val::Percent(80.0)),
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>) {
    // Spawned first so every later root draws above it.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::NONE),
        Visibility::Hidden,
        HudOverlay,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                bottom: Val::Px(crawl_bottom(0.0, config.crawl_block_height())),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            CrawlRoot,
        ))
        .with_children(|column| {
            for line in config.crawl_lines() {
                column.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 30.0,
                        ..default()
                    },
                    TextColor(CRAWL_COLOR),
                    Node {
                        height: Val::Px(config.crawl_line_spacing),
                        ..default()
                    },
                ));
            }
        });

    for slot in HudSlot::ALL {
        commands.spawn(slot_node(slot)).with_children(|row| {
            row.spawn((
                Text::new(""),
                TextFont {
                    font_size: font_size(slot),
                    ..default()
                },
                TextColor(Color::WHITE),
                Visibility::Hidden,
                HudText(slot),
            ));
        });
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(STAMINA_BAR_PADDING),
                bottom: Val::Px(STAMINA_BAR_PADDING),
                width: Val::Px(STAMINA_BAR_WIDTH),
                height: Val::Px(STAMINA_BAR_HEIGHT),
                ..default()
            },
            BackgroundColor(bar_background()),
            Visibility::Hidden,
            StaminaBarRoot(BarSlot::Stamina),
        ))
        .with_children(|bar| {
            bar.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(stamina_bar_color(1.0)),
                StaminaBarFill(BarSlot::Stamina),
            ));
        });

    info!("HUD ready");
}

// ── Update / GameSet::Present ─────────────────────────────────────────────────

pub fn sync_overlay(
    draw: Res<DrawList>,
    mut overlays: Query<(&mut BackgroundColor, &mut Visibility), With<HudOverlay>>,
) {
    for (mut background, mut visibility) in overlays.iter_mut() {
        set_visible(&mut visibility, draw.overlay.is_some());
        if let Some(alpha) = draw.overlay {
            background.0 = Color::BLACK.with_alpha(alpha);
        }
    }
}

pub fn sync_hud_text(
    draw: Res<DrawList>,
    mut texts: Query<(&HudText, &mut Text, &mut TextColor, &mut Visibility)>,
) {
    for (HudText(slot), mut text, mut color, mut visibility) in texts.iter_mut() {
        match draw.text(*slot) {
            Some(entry) => {
                if text.0 != entry.text {
                    text.0.clone_from(&entry.text);
                }
                if color.0 != entry.color {
                    color.0 = entry.color;
                }
                set_visible(&mut visibility, true);
            }
            None => set_visible(&mut visibility, false),
        }
    }
}

pub fn sync_crawl(
    draw: Res<DrawList>,
    config: Res<GameConfig>,
    mut roots: Query<(&mut Node, &mut Visibility), With<CrawlRoot>>,
) {
    let block_height = config.crawl_block_height();
    for (mut node, mut visibility) in roots.iter_mut() {
        set_visible(&mut visibility, draw.crawl.is_some());
        if let Some(offset) = draw.crawl {
            node.bottom = Val::Px(crawl_bottom(offset, block_height));
        }
    }
}

pub fn sync_bars(
    draw: Res<DrawList>,
    mut roots: Query<(&StaminaBarRoot, &mut Visibility)>,
    mut fills: Query<(&StaminaBarFill, &mut Node, &mut BackgroundColor)>,
) {
    for (StaminaBarRoot(slot), mut visibility) in roots.iter_mut() {
        set_visible(&mut visibility, draw.bar(*slot).is_some());
    }
    for (StaminaBarFill(slot), mut node, mut background) in fills.iter_mut() {
        let Some(bar) = draw.bar(*slot) else {
            continue;
        };
        let percent = bar_fill_percent(bar.current, bar.max);
        node.width = Val::Percent(percent);
        background.0 = stamina_bar_color(percent / 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;

    #[test]
    fn crawl_starts_below_and_rises() {
        let block = 760.0;
        assert_eq!(crawl_bottom(0.0, block), -760.0);
        assert_eq!(crawl_bottom(760.0, block), 0.0);
        assert!(crawl_bottom(1_500.0, block) > 720.0);
    }

    #[test]
    fn bar_fill_is_clamped() {
        assert_eq!(bar_fill_percent(100.0, 200.0), 50.0);
        assert_eq!(bar_fill_percent(300.0, 200.0), 100.0);
        assert_eq!(bar_fill_percent(-1.0, 200.0), 0.0);
        assert_eq!(bar_fill_percent(1.0, 0.0), 0.0);
    }

    fn hud_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<DrawList>();
        app.insert_resource(GameConfig {
            crawl_line_spacing: 50.0,
            ..Default::default()
        });
        app.add_systems(Startup, setup_hud);
        app.add_systems(Update, (sync_overlay, sync_hud_text, sync_crawl, sync_bars));
        app
    }

    #[test]
    fn drawn_slots_become_visible() {
        let mut app = hud_app();
        app.world_mut()
            .resource_mut::<DrawList>()
            .draw_hud_text(HudSlot::Score, "HEALTH: 85", Color::WHITE);
        app.update();

        let mut query = app
            .world_mut()
            .query::<(&HudText, &Text, &Visibility)>();
        for (HudText(slot), text, visibility) in query.iter(app.world()) {
            if *slot == HudSlot::Score {
                assert_eq!(text.0, "HEALTH: 85");
                assert_eq!(*visibility, Visibility::Inherited);
            } else {
                assert_eq!(*visibility, Visibility::Hidden);
            }
        }
    }

    #[test]
    fn overlay_follows_draw_list() {
        let mut app = hud_app();
        app.world_mut().resource_mut::<DrawList>().draw_overlay(0.8);
        app.update();

        let mut query = app
            .world_mut()
            .query_filtered::<(&BackgroundColor, &Visibility), With<HudOverlay>>();
        let (background, visibility) = query.single(app.world()).unwrap();
        assert_eq!(*visibility, Visibility::Inherited);
        assert!((background.0.alpha() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn crawl_column_uses_configured_spacing() {
        let mut app = hud_app();
        app.world_mut().resource_mut::<DrawList>().draw_crawl(100.0);
        app.update();

        let block = app.world().resource::<GameConfig>().crawl_block_height();
        let mut roots = app
            .world_mut()
            .query_filtered::<(&Node, &Visibility, &Children), With<CrawlRoot>>();
        let (node, visibility, children) = roots.single(app.world()).unwrap();
        assert_eq!(*visibility, Visibility::Inherited);
        assert_eq!(node.bottom, Val::Px(crawl_bottom(100.0, block)));
        let lines = app.world().resource::<GameConfig>().crawl_lines().len();
        assert_eq!(children.len(), lines);

        let first = children[0];
        let line_node = app.world().get::<Node>(first).unwrap();
        assert_eq!(line_node.height, Val::Px(50.0));
    }
}
