//! Drawing intents emitted by the session each frame.
//!
//! The session describes a frame through the [`Renderer`] trait without
//! knowing how it is drawn.  [`DrawList`] is the Bevy-side implementation: it
//! records the frame into a resource that [`crate::scene`] and [`crate::hud`]
//! apply to retained entities.  Tests read the same list back.
//!
//! | Mode          | World | HUD                                        |
//! |---------------|-------|--------------------------------------------|
//! | `TitleScreen` | yes   | fading title, skip hint                    |
//! | `Intro`       | yes   | crawl, skip hint                           |
//! | `Running`     | yes   | score/health, timer, stamina bar           |
//! | `GameOver`    | yes   | dark overlay, red banner, restart hint     |
//! | `Win`         | yes   | dark overlay, green banner, restart hint   |

use crate::assets::{TextureId, TextureStore};
use crate::constants::GAME_TITLE;
use crate::equipment::EquipmentPose;
use crate::mode::GameMode;
use crate::player::CameraView;
use crate::score::ScoringMode;
use crate::session::Session;
use bevy::prelude::*;

// ── Palette ──────────────────────────────────────────────────────────────────

/// Title card and intro crawl yellow.
pub const CRAWL_COLOR: Color = Color::srgb(1.0, 0.824, 0.0);
pub const HINT_COLOR: Color = Color::srgb(0.588, 0.588, 0.588);
pub const GAME_OVER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const WIN_COLOR: Color = Color::srgb(0.0, 1.0, 0.0);
/// Fallback when the star texture is missing.
pub const SKY_FALLBACK: Color = Color::srgb(0.01, 0.01, 0.03);
/// Fallback when the planet texture is missing.
pub const PLANET_FALLBACK: Color = Color::srgb(0.15, 0.35, 0.7);

/// Opacity of the dark layer behind end-of-game banners.
pub const TERMINAL_OVERLAY_ALPHA: f32 = 0.8;

pub const SKIP_HINT: &str = "Press SPACE to skip";
pub const RESTART_HINT: &str = "Press ESC to play again";

/// Stamina bar fill: green when full, yellow at half, red when empty.
pub fn stamina_bar_color(ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = if ratio < 0.5 { 1.0 } else { 1.0 - (ratio - 0.5) * 2.0 };
    let g = if ratio > 0.5 { 1.0 } else { ratio * 2.0 };
    Color::srgb(r, g, 0.0)
}

/// Either a texture or the solid colour to use without one.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Textured(Handle<Image>),
    Solid(Color),
}

impl Surface {
    pub fn lookup(textures: &(impl TextureStore + ?Sized), id: TextureId, fallback: Color) -> Self {
        textures
            .texture(id)
            .map_or(Surface::Solid(fallback), Surface::Textured)
    }
}

/// Screen placement for a line of HUD text; the renderer owns the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudSlot {
    /// Top-left score or health readout.
    Score,
    /// Top-right countdown.
    Timer,
    /// Large centred title card.
    Title,
    /// Large centred end-of-game banner.
    Banner,
    /// Centred line under the banner.
    Subtitle,
    /// Small grey line near the bottom.
    Hint,
}

impl HudSlot {
    pub const ALL: [HudSlot; 6] = [
        HudSlot::Score,
        HudSlot::Timer,
        HudSlot::Title,
        HudSlot::Banner,
        HudSlot::Subtitle,
        HudSlot::Hint,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarSlot {
    /// Bottom-left sprint stamina.
    Stamina,
}

pub trait Renderer {
    fn set_view(&mut self, view: CameraView);
    fn draw_skybox(&mut self, surface: Surface);
    /// `rotation` in degrees about the planet's vertical axis.
    fn draw_planet(&mut self, rotation: f32, surface: Surface);
    fn draw_projectile(&mut self, position: Vec3, rotation: Quat, size: f32, surface: Surface);
    fn draw_equipment(&mut self, pose: EquipmentPose);
    fn draw_hud_text(&mut self, slot: HudSlot, text: &str, color: Color);
    fn draw_bar(&mut self, slot: BarSlot, current: f32, max: f32);
    /// `offset` in pixels the crawl has scrolled up from its start.
    fn draw_crawl(&mut self, offset: f32);
    fn draw_overlay(&mut self, alpha: f32);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileDraw {
    pub position: Vec3,
    pub rotation: Quat,
    pub size: f32,
    pub surface: Surface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub slot: HudSlot,
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarDraw {
    pub slot: BarSlot,
    pub current: f32,
    pub max: f32,
}

/// One frame of drawing intents.  Rebuilt from scratch every frame.
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct DrawList {
    pub view: Option<CameraView>,
    pub skybox: Option<Surface>,
    pub planet: Option<(f32, Surface)>,
    pub projectiles: Vec<ProjectileDraw>,
    pub equipment: Option<EquipmentPose>,
    pub texts: Vec<TextDraw>,
    pub bars: Vec<BarDraw>,
    pub crawl: Option<f32>,
    pub overlay: Option<f32>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.view = None;
        self.skybox = None;
        self.planet = None;
        self.projectiles.clear();
        self.equipment = None;
        self.texts.clear();
        self.bars.clear();
        self.crawl = None;
        self.overlay = None;
    }

    /// Whether the 3D world is part of this frame.
    #[inline]
    pub fn has_world(&self) -> bool {
        self.view.is_some()
    }

    pub fn text(&self, slot: HudSlot) -> Option<&TextDraw> {
        self.texts.iter().find(|t| t.slot == slot)
    }

    pub fn bar(&self, slot: BarSlot) -> Option<&BarDraw> {
        self.bars.iter().find(|b| b.slot == slot)
    }
}

impl Renderer for DrawList {
    fn set_view(&mut self, view: CameraView) {
        self.view = Some(view);
    }

    fn draw_skybox(&mut self, surface: Surface) {
        self.skybox = Some(surface);
    }

    fn draw_planet(&mut self, rotation: f32, surface: Surface) {
        self.planet = Some((rotation, surface));
    }

    fn draw_projectile(&mut self, position: Vec3, rotation: Quat, size: f32, surface: Surface) {
        self.projectiles.push(ProjectileDraw {
            position,
            rotation,
            size,
            surface,
        });
    }

    fn draw_equipment(&mut self, pose: EquipmentPose) {
        self.equipment = Some(pose);
    }

    fn draw_hud_text(&mut self, slot: HudSlot, text: &str, color: Color) {
        self.texts.push(TextDraw {
            slot,
            text: text.to_string(),
            color,
        });
    }

    fn draw_bar(&mut self, slot: BarSlot, current: f32, max: f32) {
        self.bars.push(BarDraw { slot, current, max });
    }

    fn draw_crawl(&mut self, offset: f32) {
        self.crawl = Some(offset);
    }

    fn draw_overlay(&mut self, alpha: f32) {
        self.overlay = Some(alpha);
    }
}

impl Session {
    /// Describe the current frame to `out`.
    pub fn render<T, R>(&self, textures: &T, out: &mut R)
    where
        T: TextureStore + ?Sized,
        R: Renderer + ?Sized,
    {
        match self.mode() {
            GameMode::TitleScreen => {
                self.render_world(textures, out);
                let alpha = self.modes().title_alpha();
                out.draw_hud_text(HudSlot::Title, GAME_TITLE, CRAWL_COLOR.with_alpha(alpha));
                out.draw_hud_text(HudSlot::Hint, SKIP_HINT, HINT_COLOR);
            }
            GameMode::Intro => {
                self.render_world(textures, out);
                out.draw_crawl(self.modes().crawl_offset());
                out.draw_hud_text(HudSlot::Hint, SKIP_HINT, HINT_COLOR);
            }
            GameMode::Running => {
                self.render_world(textures, out);
                self.render_status(out);
                let stamina = &self.camera().stamina;
                out.draw_bar(BarSlot::Stamina, stamina.current(), stamina.max());
            }
            GameMode::GameOver | GameMode::Win => {
                self.render_world(textures, out);
                out.draw_overlay(TERMINAL_OVERLAY_ALPHA);
                self.render_status(out);
                if self.mode() == GameMode::GameOver {
                    out.draw_hud_text(HudSlot::Banner, "GAME OVER", GAME_OVER_COLOR);
                } else {
                    out.draw_hud_text(HudSlot::Banner, "VICTORY!", WIN_COLOR);
                    out.draw_hud_text(HudSlot::Subtitle, "You defended the planet!", Color::WHITE);
                }
                out.draw_hud_text(HudSlot::Hint, RESTART_HINT, HINT_COLOR);
            }
        }
    }

    fn render_world<T, R>(&self, textures: &T, out: &mut R)
    where
        T: TextureStore + ?Sized,
        R: Renderer + ?Sized,
    {
        out.set_view(self.camera().view());
        out.draw_skybox(Surface::lookup(textures, TextureId::Stars, SKY_FALLBACK));
        out.draw_planet(
            self.planet_rotation(),
            Surface::lookup(textures, TextureId::Planet, PLANET_FALLBACK),
        );

        let meteor_texture = textures.texture(TextureId::Meteor);
        for meteor in self.meteors() {
            let surface = match &meteor_texture {
                Some(handle) => Surface::Textured(handle.clone()),
                None => Surface::Solid(meteor.color),
            };
            out.draw_projectile(meteor.position, meteor.rotation(), meteor.size, surface);
        }

        let pose = self.equipment().pose(self.elapsed_secs());
        if pose.is_visible() {
            out.draw_equipment(pose);
        }
    }

    fn render_status<R: Renderer + ?Sized>(&self, out: &mut R) {
        let score = self.score();
        match score.policy().mode {
            ScoringMode::HealthTimer => {
                out.draw_hud_text(
                    HudSlot::Score,
                    &format!("HEALTH: {}", score.value()),
                    Color::WHITE,
                );
            }
            ScoringMode::PointsTarget => {
                out.draw_hud_text(
                    HudSlot::Score,
                    &format!("SCORE: {} / {}", score.value(), score.policy().target),
                    Color::WHITE,
                );
            }
        }
        if let Some(remaining) = self.modes().time_remaining() {
            let secs = remaining.as_millis().div_ceil(1_000);
            out.draw_hud_text(HudSlot::Timer, &format!("TIME: {secs}"), Color::WHITE);
        }
    }
}
