//! Decorative vector shapes drawn over flat card backgrounds.
//!
//! The shapes are visual constants exported from the original card artwork:
//! wave fronts anchored to the card corners and a scatter of bubbles. They
//! are kept as data tables so the renderers only decide *whether* to draw
//! them, never *what* they look like.

use piet_common::{kurbo::Circle, Piet, RenderContext};

use crate::{colors, draw::CanvasPath, error::CardError};

#[derive(Debug, Clone, Copy)]
pub(crate) enum PathCmd {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
}

/// One filled wave, its opacity applied to the card's accent color.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WaveShape {
    pub opacity: f64,
    pub commands: &'static [PathCmd],
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Bubble {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
}

use PathCmd::{CurveTo, LineTo, MoveTo};

/// Corner waves of the 800x350 base card.
pub(crate) const BASE_WAVES: &[WaveShape] = &[
    WaveShape {
        opacity: 1.0,
        commands: &[
            MoveTo(0.0, 120.0),
            CurveTo(25.6, 97.9, 64.94, 91.49, 97.0, 77.0),
            CurveTo(132.43, 63.25, 160.64, 40.33, 186.02, 14.94),
            LineTo(200.64, 0.0),
            LineTo(0.0, 0.0),
            LineTo(0.0, 120.0),
        ],
    },
    WaveShape {
        opacity: 0.74,
        commands: &[
            MoveTo(0.0, 176.82),
            CurveTo(5.2, 166.79, 11.53, 157.36, 19.25, 149.64),
            CurveTo(44.99, 123.9, 86.24, 117.9, 120.8, 103.45),
            CurveTo(155.35, 88.99, 183.21, 66.07, 208.95, 40.68),
            CurveTo(223.68, 28.13, 247.85, 1.0, 247.85, 0.0),
            LineTo(0.0, 0.0),
            LineTo(0.0, 176.82),
        ],
    },
    WaveShape {
        opacity: 0.15,
        commands: &[
            MoveTo(0.0, 290.92),
            LineTo(3.01, 272.34),
            CurveTo(6.88, 248.37, 14.64, 200.41, 40.03, 174.67),
            CurveTo(65.42, 148.93, 108.43, 144.7, 144.05, 131.3),
            CurveTo(179.66, 117.9, 207.52, 95.34, 232.9, 69.24),
            CurveTo(258.17, 43.63, 280.99, 14.87, 292.67, 0.0),
            LineTo(0.0, 0.0),
            LineTo(0.0, 290.92),
        ],
    },
    WaveShape {
        opacity: 1.0,
        commands: &[
            MoveTo(800.0, 350.0),
            LineTo(659.54, 350.0),
            CurveTo(682.24, 320.97, 707.11, 294.92, 739.63, 276.46),
            CurveTo(749.37, 270.94, 790.48, 251.69, 800.0, 246.35),
            LineTo(800.0, 350.0),
        ],
    },
    WaveShape {
        opacity: 0.74,
        commands: &[
            MoveTo(800.0, 350.0),
            LineTo(615.84, 350.0),
            CurveTo(656.4, 297.84, 681.28, 271.8, 713.8, 253.34),
            CurveTo(723.54, 247.81, 733.95, 242.94, 744.38, 238.06),
            CurveTo(764.54, 228.62, 784.71, 219.18, 800.0, 205.01),
            LineTo(800.0, 350.0),
        ],
    },
    WaveShape {
        opacity: 0.15,
        commands: &[
            MoveTo(800.0, 350.0),
            LineTo(572.33, 350.0),
            CurveTo(581.96, 335.0, 593.86, 317.27, 606.73, 300.64),
            CurveTo(628.78, 271.74, 653.69, 246.04, 687.39, 228.51),
            CurveTo(697.45, 223.28, 708.25, 218.78, 719.05, 214.28),
            CurveTo(744.45, 203.69, 769.82, 193.12, 785.32, 173.09),
            CurveTo(791.77, 164.75, 796.51, 154.72, 800.0, 144.08),
            LineTo(800.0, 350.0),
        ],
    },
];

/// Corner waves of the 1000x200 info card.
pub(crate) const INFO_WAVES: &[WaveShape] = &[
    WaveShape {
        opacity: 1.0,
        commands: &[
            MoveTo(0.0, 0.0),
            LineTo(0.0, 86.99),
            CurveTo(11.52, 76.67, 27.2, 71.53, 42.87, 66.4),
            CurveTo(49.97, 64.08, 57.07, 61.75, 63.77, 58.95),
            CurveTo(86.14, 49.59, 104.18, 34.86, 120.84, 18.31),
            CurveTo(126.92, 12.27, 132.81, 5.99, 138.2, 0.0),
            LineTo(0.0, 0.0),
        ],
    },
    WaveShape {
        opacity: 0.75,
        commands: &[
            MoveTo(0.0, 0.0),
            LineTo(0.0, 124.19),
            CurveTo(3.45, 117.4, 7.67, 111.02, 12.87, 105.86),
            CurveTo(24.54, 94.27, 41.13, 88.84, 57.71, 83.41),
            CurveTo(64.81, 81.08, 71.9, 78.76, 78.61, 75.95),
            CurveTo(100.98, 66.59, 119.01, 51.87, 135.68, 35.32),
            CurveTo(148.04, 23.05, 159.58, 9.77, 167.84, 0.0),
            LineTo(0.0, 0.0),
        ],
    },
    WaveShape {
        opacity: 0.15,
        commands: &[
            MoveTo(0.0, 0.0),
            LineTo(0.0, 198.88),
            LineTo(2.25, 184.95),
            CurveTo(4.76, 169.43, 9.9, 138.5, 26.34, 121.72),
            CurveTo(37.82, 110.0, 54.87, 105.24, 71.92, 100.48),
            CurveTo(79.28, 98.43, 86.65, 96.37, 93.56, 93.76),
            CurveTo(116.5, 85.08, 134.65, 70.36, 151.09, 53.58),
            CurveTo(167.08, 37.25, 181.57, 18.97, 189.17, 9.38),
            LineTo(196.61, 0.0),
            LineTo(0.0, 0.0),
        ],
    },
    WaveShape {
        opacity: 1.0,
        commands: &[
            MoveTo(1000.0, 200.0),
            LineTo(830.32, 200.0),
            CurveTo(839.51, 189.35, 850.88, 176.66, 862.89, 164.75),
            CurveTo(883.05, 144.76, 904.86, 126.97, 931.92, 115.67),
            CurveTo(940.03, 112.28, 948.62, 109.47, 957.2, 106.66),
            CurveTo(972.31, 101.72, 987.43, 96.78, 1000.0, 88.66),
            LineTo(1000.0, 200.0),
        ],
    },
    WaveShape {
        opacity: 0.75,
        commands: &[
            MoveTo(1000.0, 200.0),
            LineTo(794.66, 200.0),
            LineTo(798.42, 195.53),
            CurveTo(808.17, 183.92, 825.55, 163.21, 844.52, 144.45),
            CurveTo(864.73, 124.46, 886.6, 106.68, 913.73, 95.37),
            CurveTo(921.87, 91.98, 930.48, 89.18, 939.09, 86.37),
            CurveTo(959.19, 79.81, 979.32, 73.25, 993.47, 59.25),
            CurveTo(995.8, 56.94, 997.98, 54.43, 1000.0, 51.76),
            LineTo(1000.0, 200.0),
        ],
    },
    WaveShape {
        opacity: 0.15,
        commands: &[
            MoveTo(1000.0, 200.0),
            LineTo(765.5, 200.0),
            LineTo(775.46, 187.07),
            CurveTo(784.82, 175.15, 802.65, 152.45, 822.05, 132.36),
            CurveTo(841.98, 111.73, 863.69, 93.88, 890.37, 84.18),
            CurveTo(898.42, 81.26, 906.93, 79.09, 915.44, 76.92),
            CurveTo(935.15, 71.9, 954.85, 66.88, 968.77, 52.47),
            CurveTo(981.43, 39.36, 989.35, 18.55, 994.49, 0.0),
            LineTo(1000.0, 0.0),
            LineTo(1000.0, 200.0),
        ],
    },
];

/// Bubble scatter of the 1000x250 rank card.
pub(crate) const RANK_BUBBLES: &[Bubble] = &[
    Bubble { x: 153.0, y: 225.0, radius: 10.0, opacity: 0.31 },
    Bubble { x: 213.0, y: 81.0, radius: 10.0, opacity: 0.07 },
    Bubble { x: 238.0, y: 16.0, radius: 10.0, opacity: 0.6 },
    Bubble { x: 486.0, y: 148.0, radius: 40.0, opacity: 0.1 },
    Bubble { x: 396.5, y: 33.5, radius: 7.5, opacity: 0.05 },
    Bubble { x: 515.5, y: 38.5, radius: 12.5, opacity: 0.43 },
    Bubble { x: 572.0, y: 257.0, radius: 30.0, opacity: 1.0 },
    Bubble { x: 782.5, y: 226.5, radius: 8.5, opacity: 0.15 },
    Bubble { x: 1000.0, y: 101.0, radius: 10.0, opacity: 0.63 },
];

pub(crate) fn draw_waves(
    rc: &mut Piet<'_>,
    shapes: &[WaveShape],
    color: &str,
) -> Result<(), CardError> {
    for shape in shapes {
        let brush = colors::resolve_with_opacity(color, shape.opacity)?;
        let mut path = CanvasPath::new();
        for command in shape.commands {
            match *command {
                MoveTo(x, y) => {
                    path.move_to(x, y);
                }
                LineTo(x, y) => {
                    path.line_to(x, y);
                }
                CurveTo(c1x, c1y, c2x, c2y, x, y) => {
                    path.bezier_curve_to(c1x, c1y, c2x, c2y, x, y);
                }
            }
        }
        rc.fill(path.finish(), &brush);
    }
    Ok(())
}

pub(crate) fn draw_bubbles(
    rc: &mut Piet<'_>,
    bubbles: &[Bubble],
    color: &str,
) -> Result<(), CardError> {
    for bubble in bubbles {
        let brush = colors::resolve_with_opacity(color, bubble.opacity)?;
        rc.fill(Circle::new((bubble.x, bubble.y), bubble.radius), &brush);
    }
    Ok(())
}
