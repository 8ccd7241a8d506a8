//! Node colors as a pure function of `(index, depth)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprig_core::{Color, ColorIndexing, ColorSchemeKind, Node, ROOT_DEPTH, ThemeConfig, parse_color};
use std::fmt;
use std::sync::Arc;

pub const GRADIENT_ROOT: &str = "#182536";
pub const GRADIENT_PALETTE: [&str; 5] = ["#8A4FFF", "#32B679", "#FF8C82", "#FFA726", "#4B7BF5"];
pub const ENHANCED_ROOT: &str = "#2C3E50";
pub const ENHANCED_PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD"];

const GRADIENT_STEP: f64 = 0.15;
const GRADIENT_MAX_MIX: f64 = 0.6;
const ENHANCED_STEP: f64 = 0.15;
const ENHANCED_MAX_LIGHTNESS: f64 = 0.8;
const ENHANCED_SATURATION_DECAY: f64 = 0.1;
const ENHANCED_MIN_SATURATION: f64 = 0.2;
const JITTER: f64 = 0.05;

/// Lightness jitter for the enhanced scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jitter {
    #[default]
    Off,
    /// Reproducible per `(index, depth)` for a given seed.
    Seeded(u64),
    /// Fresh randomness on every call.
    Entropy,
}

impl Jitter {
    fn offset(self, index: usize, depth: i32) -> f64 {
        match self {
            Jitter::Off => 0.0,
            Jitter::Seeded(seed) => {
                let key = seed
                    ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    ^ (depth as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
                StdRng::seed_from_u64(key).gen_range(-JITTER..=JITTER)
            }
            Jitter::Entropy => rand::thread_rng().gen_range(-JITTER..=JITTER),
        }
    }
}

pub type ColorFn = Arc<dyn Fn(usize, i32) -> Color + Send + Sync>;

#[derive(Clone)]
pub enum ColorScheme {
    /// Depth-0 palette; each deeper level mixes its parent level's color toward white.
    Gradient { root: Color, palette: Vec<Color> },
    /// Branch color lightened by depth, then pulled toward mid-grey.
    Enhanced {
        root: Color,
        palette: Vec<Color>,
        jitter: Jitter,
    },
    /// Palette by index at every depth.
    Cyclic { root: Color, palette: Vec<Color> },
    Custom(ColorFn),
}

impl fmt::Debug for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Gradient { root, palette } => f
                .debug_struct("Gradient")
                .field("root", root)
                .field("palette", palette)
                .finish(),
            ColorScheme::Enhanced {
                root,
                palette,
                jitter,
            } => f
                .debug_struct("Enhanced")
                .field("root", root)
                .field("palette", palette)
                .field("jitter", jitter)
                .finish(),
            ColorScheme::Cyclic { root, palette } => f
                .debug_struct("Cyclic")
                .field("root", root)
                .field("palette", palette)
                .finish(),
            ColorScheme::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Gradient {
            root: builtin(GRADIENT_ROOT),
            palette: GRADIENT_PALETTE.iter().map(|c| builtin(c)).collect(),
        }
    }
}

fn builtin(hex: &str) -> Color {
    parse_color(hex).unwrap_or_else(|_| Color::new(0, 0, 0))
}

impl ColorScheme {
    pub fn enhanced(jitter: Jitter) -> Self {
        ColorScheme::Enhanced {
            root: builtin(ENHANCED_ROOT),
            palette: ENHANCED_PALETTE.iter().map(|c| builtin(c)).collect(),
            jitter,
        }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(usize, i32) -> Color + Send + Sync + 'static,
    {
        ColorScheme::Custom(Arc::new(f))
    }

    pub fn from_theme(theme: &ThemeConfig) -> sprig_core::Result<Self> {
        let (default_root, default_palette) = match theme.scheme {
            ColorSchemeKind::Enhanced => (ENHANCED_ROOT, ENHANCED_PALETTE),
            ColorSchemeKind::Gradient | ColorSchemeKind::Cyclic => (GRADIENT_ROOT, GRADIENT_PALETTE),
        };
        let root = parse_color(theme.root_color.as_deref().unwrap_or(default_root))?;
        let sources: Vec<&str> = if theme.palette.is_empty() {
            default_palette.to_vec()
        } else {
            theme.palette.iter().map(String::as_str).collect()
        };
        let palette = sources
            .into_iter()
            .map(parse_color)
            .collect::<sprig_core::Result<Vec<_>>>()?;

        Ok(match theme.scheme {
            ColorSchemeKind::Gradient => ColorScheme::Gradient { root, palette },
            ColorSchemeKind::Enhanced => ColorScheme::Enhanced {
                root,
                palette,
                jitter: theme.jitter_seed.map_or(Jitter::Off, Jitter::Seeded),
            },
            ColorSchemeKind::Cyclic => ColorScheme::Cyclic { root, palette },
        })
    }

    pub fn color(&self, index: usize, depth: i32) -> Color {
        match self {
            ColorScheme::Custom(f) => f(index, depth),
            ColorScheme::Gradient { root, palette } => {
                if depth <= ROOT_DEPTH {
                    return *root;
                }
                (1..=depth).fold(pick(palette, index), gradient_step)
            }
            ColorScheme::Enhanced {
                root,
                palette,
                jitter,
            } => {
                if depth <= ROOT_DEPTH {
                    return *root;
                }
                let base = pick(palette, index);
                if depth == 0 {
                    return base;
                }
                let d = f64::from(depth);
                let lighten = ((d * ENHANCED_STEP).min(ENHANCED_MAX_LIGHTNESS)
                    + jitter.offset(index, depth))
                .clamp(0.0, ENHANCED_MAX_LIGHTNESS);
                let saturation =
                    (1.0 - d * ENHANCED_SATURATION_DECAY).max(ENHANCED_MIN_SATURATION);
                map_channels(base, |v| {
                    let lifted = v + (1.0 - v) * lighten;
                    ((lifted - 0.5) * saturation + 0.5).clamp(0.0, 1.0)
                })
            }
            ColorScheme::Cyclic { root, palette } => {
                if depth <= ROOT_DEPTH {
                    *root
                } else {
                    pick(palette, index)
                }
            }
        }
    }
}

/// One gradient level: mixes `c` toward white by the amount for `level`.
fn gradient_step(c: Color, level: i32) -> Color {
    let mix = (f64::from(level - 1) * GRADIENT_STEP).min(GRADIENT_MAX_MIX);
    map_channels(c, |v| v * (1.0 - mix) + mix)
}

/// Gradient colors by palette slot and depth, extended one level at a time.
#[derive(Default)]
struct GradientLevels {
    slots: Vec<Vec<Color>>,
}

impl GradientLevels {
    fn color(&mut self, palette: &[Color], index: usize, depth: i32) -> Color {
        let slot = index % palette.len();
        if self.slots.len() < palette.len() {
            self.slots.resize_with(palette.len(), Vec::new);
        }
        let levels = &mut self.slots[slot];
        if levels.is_empty() {
            levels.push(palette[slot]);
        }
        let depth = depth.max(0) as usize;
        while levels.len() <= depth {
            let next = gradient_step(levels[levels.len() - 1], levels.len() as i32);
            levels.push(next);
        }
        levels[depth]
    }
}

fn pick(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        return Color::new(0, 0, 0);
    }
    palette[index % palette.len()]
}

/// Applies `f` to each channel in `[0, 1]` and truncates back to 8 bits.
fn map_channels(c: Color, f: impl Fn(f64) -> f64) -> Color {
    let c = c.into_format::<f64>();
    let to_u8 = |v: f64| (f(v) * 255.0) as u8;
    Color::new(to_u8(c.red), to_u8(c.green), to_u8(c.blue))
}

/// Colors every node of the tree. The root gets depth `-1`.
///
/// Gradient levels are cached per palette slot, so deep trees cost one mix per level rather than
/// one per level per node.
pub fn assign_colors(root: &mut Node, scheme: &ColorScheme, indexing: ColorIndexing) {
    let mut gradient = GradientLevels::default();
    root.walk_mut(|node, visit| {
        let index = match indexing {
            ColorIndexing::Sibling => visit.sibling_index,
            ColorIndexing::Branch if visit.depth <= 0 => visit.sibling_index,
            ColorIndexing::Branch => visit.branch_index,
        };
        let color = match scheme {
            ColorScheme::Gradient { palette, .. }
                if visit.depth > ROOT_DEPTH && !palette.is_empty() =>
            {
                gradient.color(palette, index, visit.depth)
            }
            _ => scheme.color(index, visit.depth),
        };
        node.set_color(color);
    });
}
