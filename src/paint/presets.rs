use crate::foundation::core::Rgba8;
use crate::paint::gradient::GradientStop;

/// Canned gradient ramps addressable by name or by 1-based index.
const PRESETS: &[(&str, &[(f32, [u8; 3])])] = &[
    (
        "WarmFlame",
        &[(0.0, [0xff, 0x9a, 0x9e]), (0.99, [0xfa, 0xd0, 0xc4]), (1.0, [0xfa, 0xd0, 0xc4])],
    ),
    ("NightFade", &[(0.0, [0xa1, 0x8c, 0xd1]), (1.0, [0xfb, 0xc2, 0xeb])]),
    ("SpringWarmth", &[(0.0, [0xfa, 0xd0, 0xc4]), (1.0, [0xff, 0xd1, 0xff])]),
    ("JuicyPeach", &[(0.0, [0xff, 0xec, 0xd2]), (1.0, [0xfc, 0xb6, 0x9f])]),
    (
        "YoungPassion",
        &[
            (0.0, [0xff, 0x81, 0x77]),
            (0.21, [0xff, 0x8c, 0x7f]),
            (0.52, [0xf9, 0x91, 0x85]),
            (0.78, [0xcf, 0x55, 0x6c]),
            (1.0, [0xb1, 0x2a, 0x5b]),
        ],
    ),
    (
        "LadyLips",
        &[(0.0, [0xff, 0x9a, 0x9e]), (0.99, [0xfe, 0xcf, 0xef]), (1.0, [0xfe, 0xcf, 0xef])],
    ),
    ("SunnyMorning", &[(0.0, [0xf6, 0xd3, 0x65]), (1.0, [0xfd, 0xa0, 0x85])]),
    ("RainyAshville", &[(0.0, [0xfb, 0xc2, 0xeb]), (1.0, [0xa6, 0xc1, 0xee])]),
    (
        "FrozenDreams",
        &[(0.0, [0xfd, 0xcb, 0xf1]), (0.01, [0xfd, 0xcb, 0xf1]), (1.0, [0xe6, 0xde, 0xe9])],
    ),
    ("WinterNeva", &[(0.0, [0xa1, 0xc4, 0xfd]), (1.0, [0xc2, 0xe9, 0xfb])]),
    ("DustyGrass", &[(0.0, [0xd4, 0xfc, 0x79]), (1.0, [0x96, 0xe6, 0xa1])]),
    ("TemptingAzure", &[(0.0, [0x84, 0xfa, 0xb0]), (1.0, [0x8f, 0xd3, 0xf4])]),
];

fn stops_of(table: &[(f32, [u8; 3])]) -> Vec<GradientStop> {
    table
        .iter()
        .map(|&(position, [r, g, b])| GradientStop {
            position,
            color: Rgba8::new(r, g, b, 255),
        })
        .collect()
}

/// Number of available presets.
pub fn preset_count() -> usize {
    PRESETS.len()
}

/// Preset stops by case-insensitive name.
pub fn preset_by_name(name: &str) -> Option<Vec<GradientStop>> {
    PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|(_, table)| stops_of(table))
}

/// Preset stops by 1-based index.
pub fn preset_by_index(index: i64) -> Option<Vec<GradientStop>> {
    let i = usize::try_from(index).ok()?.checked_sub(1)?;
    PRESETS.get(i).map(|(_, table)| stops_of(table))
}
