/// Body table: orbital parameters, educational info and the flattened catalog.
///
/// The table is a tree (satellites nest under their parent). The catalog
/// flattens it once, depth-first with parents before children, so any
/// in-order pass sees a parent before its satellites.

use std::collections::HashSet;
use std::f32::consts::TAU;
use serde::{Deserialize, Serialize};
use orrery_engine::AssetManifest;

use crate::error::ConfigError;

const TEXTURE_BASE: &str = "https://cdn.jsdelivr.net/gh/jeromeetienne/threex.planets@master/images/";
const CUSTOM_TEXTURES: &str = "https://cdn.jsdelivr.net/gh/MuCi-CV/deep-space-sound@main/public/images/";
const MOON_TEXTURES: &str = "https://cdn.jsdelivr.net/gh/MuCi-CV/deep-space-sound@main/public/images/moons/";

/// Texture key of the alternate sun texture.
pub const SUN_ALT_TEXTURE: &str = "sun-b";
const SUN_ALT_URL: &str = "https://cdn.jsdelivr.net/gh/MuCi-CV/deep-space-sound@main/public/images/sunmap2.jpg";

/// Body whose selection is followed through its parent.
pub const MOON_ID: &str = "moon";
pub const EARTH_ID: &str = "earth";
pub const ERIS_ID: &str = "eris";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
    Asteroid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
}

/// Info-panel text. Always shown for the selected body itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyInfo {
    pub name: String,
    pub description: String,
    pub diameter: String,
    pub distance_from_sun: String,
    pub orbital_period: String,
}

/// One node of the body tree. Orbit parameters are in the parent's frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalBody {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BodyKind,
    #[serde(default)]
    pub texture_url: String,
    pub size: f32,
    #[serde(default)]
    pub orbit_radius: f32,
    #[serde(default)]
    pub orbital_speed: f32,
    #[serde(default)]
    pub rotation_speed: f32,
    /// Degrees, about the parent frame's X axis.
    #[serde(default)]
    pub orbit_inclination: f32,
    #[serde(default)]
    pub orbit_eccentricity: f32,
    /// Radians. Derived from the id when absent.
    #[serde(default)]
    pub initial_orbit_angle: Option<f32>,
    #[serde(default)]
    pub is_sun: bool,
    /// Hidden along with the advanced-moons feature.
    #[serde(default)]
    pub is_togglable: bool,
    #[serde(default)]
    pub ring: Option<Ring>,
    #[serde(flatten)]
    pub info: BodyInfo,
    #[serde(default)]
    pub satellites: Vec<OrbitalBody>,
}

impl OrbitalBody {
    pub fn new(id: &str, kind: BodyKind, size: f32) -> Self {
        Self {
            id: id.to_string(),
            kind,
            texture_url: String::new(),
            size,
            orbit_radius: 0.0,
            orbital_speed: 0.0,
            rotation_speed: 0.0,
            orbit_inclination: 0.0,
            orbit_eccentricity: 0.0,
            initial_orbit_angle: None,
            is_sun: false,
            is_togglable: false,
            ring: None,
            info: BodyInfo::default(),
            satellites: Vec::new(),
        }
    }

    pub fn with_orbit(mut self, radius: f32, speed: f32) -> Self {
        self.orbit_radius = radius;
        self.orbital_speed = speed;
        self
    }

    pub fn with_rotation(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    pub fn with_tilted_orbit(mut self, inclination_deg: f32, eccentricity: f32) -> Self {
        self.orbit_inclination = inclination_deg;
        self.orbit_eccentricity = eccentricity;
        self
    }

    pub fn with_phase(mut self, angle: f32) -> Self {
        self.initial_orbit_angle = Some(angle);
        self
    }

    pub fn with_texture(mut self, url: String) -> Self {
        self.texture_url = url;
        self
    }

    pub fn with_ring(mut self, inner_radius: f32, outer_radius: f32) -> Self {
        self.ring = Some(Ring { inner_radius, outer_radius });
        self
    }

    pub fn with_info(
        mut self,
        name: &str,
        description: &str,
        diameter: &str,
        distance_from_sun: &str,
        orbital_period: &str,
    ) -> Self {
        self.info = BodyInfo {
            name: name.to_string(),
            description: description.to_string(),
            diameter: diameter.to_string(),
            distance_from_sun: distance_from_sun.to_string(),
            orbital_period: orbital_period.to_string(),
        };
        self
    }

    pub fn togglable(mut self) -> Self {
        self.is_togglable = true;
        self
    }

    pub fn sun(mut self) -> Self {
        self.is_sun = true;
        self
    }

    pub fn with_satellites(mut self, satellites: Vec<OrbitalBody>) -> Self {
        self.satellites = satellites;
        self
    }

    /// Orbit phase at t = 0.
    pub fn phase(&self) -> f32 {
        self.initial_orbit_angle.unwrap_or_else(|| id_phase(&self.id))
    }

    /// A body with no orbit radius never moves relative to its parent.
    pub fn is_stationary(&self) -> bool {
        self.orbit_radius == 0.0
    }
}

/// Deterministic hash (no external rand crate).
pub fn body_hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

/// Hash mapped onto [0, 1].
pub fn unit_hash(seed: u32) -> f32 {
    (body_hash(seed) as f64 / u32::MAX as f64) as f32
}

/// FNV-1a over the id bytes, used to seed per-body values.
pub fn id_seed(id: &str) -> u32 {
    id.bytes()
        .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619))
}

/// Stable orbit phase in [0, TAU) for a body without an explicit one.
pub fn id_phase(id: &str) -> f32 {
    (unit_hash(id_seed(id)) * TAU) % TAU
}

// ── Catalog ──────────────────────────────────────────────────────────

/// A body plus its place in the tree. `body.satellites` is emptied;
/// use `children` instead.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyNode {
    pub body: OrbitalBody,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Index of the root-level ancestor (self for root-level bodies).
    pub top_level: usize,
    pub depth: usize,
}

/// Immutable, validated body table in depth-first order.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyCatalog {
    nodes: Vec<BodyNode>,
    roots: Vec<usize>,
}

impl BodyCatalog {
    /// Validate and flatten a body tree.
    pub fn new(roots: Vec<OrbitalBody>) -> Result<Self, ConfigError> {
        validate(&roots)?;
        Ok(Self::flatten(roots))
    }

    /// Parse a JSON array of root-level bodies.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let roots: Vec<OrbitalBody> = serde_json::from_str(json)?;
        Self::new(roots)
    }

    /// The exhibit's built-in table.
    pub fn builtin() -> Self {
        Self::flatten(default_bodies())
    }

    fn flatten(roots: Vec<OrbitalBody>) -> Self {
        let mut catalog = Self {
            nodes: Vec::new(),
            roots: Vec::with_capacity(roots.len()),
        };
        for body in roots {
            let idx = catalog.nodes.len();
            catalog.roots.push(idx);
            catalog.push(body, None, idx, 0);
        }
        catalog
    }

    fn push(&mut self, mut body: OrbitalBody, parent: Option<usize>, top_level: usize, depth: usize) {
        let idx = self.nodes.len();
        let satellites = std::mem::take(&mut body.satellites);
        self.nodes.push(BodyNode {
            body,
            parent,
            children: Vec::with_capacity(satellites.len()),
            top_level,
            depth,
        });
        if let Some(p) = parent {
            self.nodes[p].children.push(idx);
        }
        for sat in satellites {
            self.push(sat, Some(idx), top_level, depth + 1);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> Option<&BodyNode> {
        self.nodes.get(idx)
    }

    pub fn body(&self, idx: usize) -> Option<&OrbitalBody> {
        self.nodes.get(idx).map(|n| &n.body)
    }

    pub fn nodes(&self) -> &[BodyNode] {
        &self.nodes
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.body.id == id)
    }

    /// Root-level bodies in table order (the next/previous cycle).
    pub fn top_level(&self) -> &[usize] {
        &self.roots
    }

    /// Position of a root-level body in `top_level()`.
    pub fn top_level_position(&self, idx: usize) -> Option<usize> {
        self.roots.iter().position(|&r| r == idx)
    }

    /// True if `ancestor` is `idx` or one of its ancestors.
    pub fn is_within(&self, idx: usize, ancestor: usize) -> bool {
        let mut cur = Some(idx);
        while let Some(i) = cur {
            if i == ancestor {
                return true;
            }
            cur = self.nodes.get(i).and_then(|n| n.parent);
        }
        false
    }

    /// Texture manifest keyed by body id, plus the alternate sun texture.
    pub fn texture_manifest(&self) -> AssetManifest {
        let mut manifest = AssetManifest::default();
        for node in &self.nodes {
            if !node.body.texture_url.is_empty() {
                manifest.add_texture(node.body.id.clone(), node.body.texture_url.clone());
            }
        }
        manifest.add_texture(SUN_ALT_TEXTURE, SUN_ALT_URL);
        manifest
    }
}

fn validate(roots: &[OrbitalBody]) -> Result<(), ConfigError> {
    if roots.is_empty() {
        return Err(ConfigError::EmptyTable);
    }
    let anchors = roots.iter().filter(|b| b.is_stationary()).count();
    if anchors != 1 {
        return Err(ConfigError::AnchorCount(anchors));
    }
    let mut seen = HashSet::new();
    let mut stack: Vec<&OrbitalBody> = roots.iter().collect();
    while let Some(body) = stack.pop() {
        validate_body(body)?;
        if !seen.insert(body.id.as_str()) {
            return Err(ConfigError::DuplicateId(body.id.clone()));
        }
        stack.extend(body.satellites.iter());
    }
    Ok(())
}

fn validate_body(body: &OrbitalBody) -> Result<(), ConfigError> {
    let id = &body.id;
    if id.is_empty() {
        return Err(ConfigError::EmptyId);
    }
    let fields = [
        ("size", body.size),
        ("orbitRadius", body.orbit_radius),
        ("orbitalSpeed", body.orbital_speed),
        ("rotationSpeed", body.rotation_speed),
        ("orbitInclination", body.orbit_inclination),
        ("orbitEccentricity", body.orbit_eccentricity),
        ("initialOrbitAngle", body.initial_orbit_angle.unwrap_or(0.0)),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite { id: id.clone(), field });
        }
    }
    if body.size <= 0.0 {
        return Err(ConfigError::InvalidSize { id: id.clone(), size: body.size });
    }
    if body.orbit_radius < 0.0 {
        return Err(ConfigError::NegativeOrbitRadius { id: id.clone(), radius: body.orbit_radius });
    }
    if !(0.0..1.0).contains(&body.orbit_eccentricity) {
        return Err(ConfigError::InvalidEccentricity {
            id: id.clone(),
            eccentricity: body.orbit_eccentricity,
        });
    }
    if let Some(ring) = body.ring {
        if !(ring.inner_radius >= 0.0 && ring.inner_radius < ring.outer_radius) {
            return Err(ConfigError::InvalidRing {
                id: id.clone(),
                inner: ring.inner_radius,
                outer: ring.outer_radius,
            });
        }
    }
    Ok(())
}

// ── Built-in table ───────────────────────────────────────────────────

fn tex(base: &str, file: &str) -> String {
    format!("{base}{file}")
}

fn moon(id: &str, size: f32, radius: f32, speed: f32, rotation: f32) -> OrbitalBody {
    OrbitalBody::new(id, BodyKind::Moon, size)
        .with_orbit(radius, speed)
        .with_rotation(rotation)
        .with_texture(tex(MOON_TEXTURES, &format!("{id}map.jpg")))
        .togglable()
}

fn asteroid(id: &str, size: f32, radius: f32, speed: f32, rotation: f32) -> OrbitalBody {
    OrbitalBody::new(id, BodyKind::Asteroid, size)
        .with_orbit(radius, speed)
        .with_rotation(rotation)
        .with_texture(tex(CUSTOM_TEXTURES, &format!("{id}map.jpg")))
        .togglable()
}

/// Sun, planets with their moons, main-belt asteroids and two dwarf planets.
/// Sizes and distances are exhibit units, not to scale.
pub fn default_bodies() -> Vec<OrbitalBody> {
    vec![
        OrbitalBody::new("sun", BodyKind::Star, 8.0)
            .sun()
            .with_rotation(0.05)
            .with_texture(tex(CUSTOM_TEXTURES, "sunmap.jpg"))
            .with_info("Sun", "The star at the centre of our solar system. Its gravity holds everything in orbit, from the largest planets to the smallest debris.",
                "1,392,684 km", "0 km", "N/A"),
        OrbitalBody::new("mercury", BodyKind::Planet, 0.8)
            .with_orbit(15.0, 0.8)
            .with_rotation(0.1)
            .with_texture(tex(TEXTURE_BASE, "mercurymap.jpg"))
            .with_info("Mercury", "The smallest planet and the closest to the Sun. A world of extremes, scorching by day and freezing by night.",
                "4,879 km", "57.9 million km", "88 Earth days"),
        OrbitalBody::new("venus", BodyKind::Planet, 1.2)
            .with_orbit(22.0, 0.65)
            .with_rotation(0.08)
            .with_texture(tex(TEXTURE_BASE, "venusmap.jpg"))
            .with_info("Venus", "Often called Earth's twin for its similar size. Its dense, toxic atmosphere traps heat in a runaway greenhouse effect.",
                "12,104 km", "108.2 million km", "225 Earth days"),
        OrbitalBody::new(EARTH_ID, BodyKind::Planet, 1.3)
            .with_orbit(32.0, 0.5)
            .with_rotation(0.2)
            .with_texture(tex(TEXTURE_BASE, "earthmap1k.jpg"))
            .with_info("Earth", "Our home, the only place in the universe known to harbour life. The fifth largest planet in the solar system.",
                "12,742 km", "149.6 million km", "365.25 Earth days")
            .with_satellites(vec![
                OrbitalBody::new(MOON_ID, BodyKind::Moon, 0.4)
                    .with_orbit(2.5, 2.0)
                    .with_rotation(0.3)
                    .with_texture(tex(TEXTURE_BASE, "moonmap1k.jpg"))
                    .with_info("Moon", "Earth's only natural satellite. It stabilises our planet's axis and moderates its climate.",
                        "3,474 km", "149.6 million km (orbits Earth)", "27.3 Earth days"),
            ]),
        OrbitalBody::new("mars", BodyKind::Planet, 1.0)
            .with_orbit(45.0, 0.4)
            .with_rotation(0.22)
            .with_texture(tex(TEXTURE_BASE, "marsmap1k.jpg"))
            .with_info("Mars", "The Red Planet, coloured by iron oxide. A cold desert world with a thin atmosphere, polar caps and giant canyons.",
                "6,779 km", "227.9 million km", "687 Earth days")
            .with_satellites(vec![
                moon("phobos", 0.1, 1.5, 4.0, 0.5)
                    .with_info("Phobos", "The larger of Mars' two moons, irregular in shape and covered in craters.",
                        "22.5 km", "227.9 million km (orbits Mars)", "0.3 Earth days"),
                moon("deimos", 0.08, 2.2, 3.0, 0.4)
                    .with_info("Deimos", "The smaller and outer of Mars' moons, with a smoother surface than Phobos.",
                        "12.4 km", "227.9 million km (orbits Mars)", "1.3 Earth days"),
            ]),
        asteroid("ceres", 0.5, 55.0, 0.3, 0.3)
            .with_info("Ceres", "The largest object in the asteroid belt and the only dwarf planet in the inner solar system, made of rock and ice.",
                "940 km", "413.7 million km", "4.6 Earth years"),
        asteroid("vesta", 0.3, 52.0, 0.32, 0.4)
            .with_info("Vesta", "The second most massive object in the asteroid belt, with a huge impact crater at its south pole.",
                "525 km", "353.2 million km", "3.6 Earth years"),
        asteroid("pallas", 0.3, 58.0, 0.28, 0.35)
            .with_info("Pallas", "The third largest asteroid, notable for an orbit steeply inclined to the planets.",
                "512 km", "414.7 million km", "4.6 Earth years"),
        OrbitalBody::new("jupiter", BodyKind::Planet, 4.0)
            .with_orbit(75.0, 0.2)
            .with_rotation(0.4)
            .with_texture(tex(TEXTURE_BASE, "jupitermap.jpg"))
            .with_info("Jupiter", "The largest planet in the solar system. The Great Red Spot is a storm bigger than Earth.",
                "139,820 km", "778.5 million km", "11.9 Earth years")
            .with_satellites(vec![
                moon("io", 0.5, 5.0, 2.5, 0.6)
                    .with_info("Io", "The most volcanically active body in the solar system, with hundreds of volcanoes.",
                        "3,642 km", "778.5 million km (orbits Jupiter)", "1.8 Earth days"),
                moon("europa", 0.45, 6.0, 2.2, 0.5)
                    .with_info("Europa", "Its smooth icy crust is thought to hide an ocean of liquid water.",
                        "3,122 km", "778.5 million km (orbits Jupiter)", "3.5 Earth days"),
                moon("ganymede", 0.7, 7.5, 1.8, 0.4)
                    .with_info("Ganymede", "The largest moon in the solar system, bigger than Mercury, and the only one with its own magnetic field.",
                        "5,268 km", "778.5 million km (orbits Jupiter)", "7.2 Earth days"),
                moon("callisto", 0.65, 9.0, 1.5, 0.3)
                    .with_info("Callisto", "One of the oldest and most heavily cratered surfaces in the solar system.",
                        "4,821 km", "778.5 million km (orbits Jupiter)", "16.7 Earth days"),
            ]),
        OrbitalBody::new("saturn", BodyKind::Planet, 3.5)
            .with_orbit(100.0, 0.15)
            .with_rotation(0.35)
            .with_texture(tex(TEXTURE_BASE, "saturnmap.jpg"))
            .with_ring(4.5, 7.0)
            .with_info("Saturn", "Famous for its spectacular rings of ice and rock particles.",
                "116,460 km", "1.4 billion km", "29.5 Earth years")
            .with_satellites(vec![
                moon("titan", 0.7, 9.0, 1.6, 0.4)
                    .with_info("Titan", "Saturn's largest moon and the only moon with a dense atmosphere, with lakes of liquid methane.",
                        "5,149 km", "1.4 billion km (orbits Saturn)", "16 Earth days"),
            ]),
        OrbitalBody::new("uranus", BodyKind::Planet, 2.5)
            .with_orbit(125.0, 0.1)
            .with_rotation(0.3)
            .with_texture(tex(TEXTURE_BASE, "uranusmap.jpg"))
            .with_info("Uranus", "An ice giant that spins on its side, its axis pointing almost at the Sun.",
                "50,724 km", "2.9 billion km", "84 Earth years"),
        OrbitalBody::new("neptune", BodyKind::Planet, 2.4)
            .with_orbit(150.0, 0.08)
            .with_rotation(0.28)
            .with_texture(tex(TEXTURE_BASE, "neptunemap.jpg"))
            .with_info("Neptune", "The most distant and windiest planet, dark and cold. The first planet found by mathematical prediction.",
                "49,244 km", "4.5 billion km", "164.8 Earth years")
            .with_satellites(vec![
                moon("triton", 0.4, 4.0, 1.8, 0.4)
                    .with_info("Triton", "Neptune's largest moon and the only large moon with a retrograde orbit.",
                        "2,700 km", "4.5 billion km (orbits Neptune)", "5.9 Earth days"),
            ]),
        OrbitalBody::new("pluto", BodyKind::DwarfPlanet, 0.5)
            .with_orbit(170.0, 0.07)
            .with_rotation(0.15)
            .with_tilted_orbit(17.16, 0.248)
            .with_texture(tex(CUSTOM_TEXTURES, "plutomap1k.jpg"))
            .with_info("Pluto", "A dwarf planet in the Kuiper belt with an eccentric, inclined orbit and a giant heart of nitrogen ice.",
                "2,376 km", "5.9 billion km", "248 Earth years"),
        OrbitalBody::new(ERIS_ID, BodyKind::DwarfPlanet, 0.48)
            .with_orbit(250.0, 0.05)
            .with_rotation(0.1)
            .with_tilted_orbit(44.0, 0.44)
            .with_texture(tex(CUSTOM_TEXTURES, "erismap.jpg"))
            .togglable()
            .with_info("Eris", "One of the largest known dwarf planets, on an orbit that carries it far above the plane of the planets.",
                "2,326 km", "10.1 billion km (average)", "558 Earth years"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        assert!(validate(&default_bodies()).is_ok());
        let catalog = BodyCatalog::builtin();
        assert_eq!(catalog.top_level().len(), 14);
        // 14 root-level bodies plus 9 moons
        assert_eq!(catalog.len(), 23);
    }

    #[test]
    fn flattening_puts_parents_first() {
        let catalog = BodyCatalog::builtin();
        for (idx, node) in catalog.nodes().iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent < idx, "{} listed before its parent", node.body.id);
                assert!(catalog.nodes()[parent].children.contains(&idx));
            }
            assert!(node.body.satellites.is_empty());
        }
    }

    #[test]
    fn moon_belongs_to_earth() {
        let catalog = BodyCatalog::builtin();
        let moon = catalog.index_of(MOON_ID).unwrap();
        let earth = catalog.index_of(EARTH_ID).unwrap();
        assert_eq!(catalog.node(moon).unwrap().parent, Some(earth));
        assert_eq!(catalog.node(moon).unwrap().top_level, earth);
        assert!(catalog.is_within(moon, earth));
        assert!(!catalog.is_within(earth, moon));
        assert!(!catalog.body(moon).unwrap().is_togglable);
    }

    #[test]
    fn only_the_sun_is_stationary() {
        let catalog = BodyCatalog::builtin();
        let stationary: Vec<_> = catalog
            .nodes()
            .iter()
            .filter(|n| n.body.is_stationary())
            .map(|n| n.body.id.as_str())
            .collect();
        assert_eq!(stationary, vec!["sun"]);
    }

    #[test]
    fn derived_phases_are_stable_and_in_range() {
        for id in ["mercury", "earth", "io", "eris"] {
            let p = id_phase(id);
            assert_eq!(p, id_phase(id));
            assert!((0.0..TAU).contains(&p), "{id}: {p}");
        }
        assert_ne!(id_phase("earth"), id_phase("mars"));
    }

    #[test]
    fn parses_json_table() {
        let json = r#"[
            { "id": "sun", "type": "star", "size": 8, "isSun": true, "name": "Sun" },
            { "id": "earth", "type": "planet", "size": 1.3, "orbitRadius": 32, "orbitalSpeed": 0.5,
              "rotationSpeed": 0.2, "initialOrbitAngle": 1.0, "name": "Earth",
              "distanceFromSun": "149.6 million km",
              "satellites": [
                { "id": "moon", "type": "moon", "size": 0.4, "orbitRadius": 2.5, "orbitalSpeed": 2 }
              ] }
        ]"#;
        let catalog = BodyCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        let earth = catalog.body(1).unwrap();
        assert_eq!(earth.info.name, "Earth");
        assert_eq!(earth.info.distance_from_sun, "149.6 million km");
        assert_eq!(earth.phase(), 1.0);
        assert_eq!(catalog.body(2).unwrap().kind, BodyKind::Moon);
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(matches!(BodyCatalog::from_json("[]"), Err(ConfigError::EmptyTable)));
        assert!(matches!(BodyCatalog::from_json("{"), Err(ConfigError::JsonError(_))));

        let two_suns = vec![
            OrbitalBody::new("a", BodyKind::Star, 1.0),
            OrbitalBody::new("b", BodyKind::Star, 1.0),
        ];
        assert!(matches!(BodyCatalog::new(two_suns), Err(ConfigError::AnchorCount(2))));

        let eccentric = vec![
            OrbitalBody::new("sun", BodyKind::Star, 1.0),
            OrbitalBody::new("x", BodyKind::Planet, 1.0).with_orbit(10.0, 1.0).with_tilted_orbit(0.0, 1.0),
        ];
        assert!(matches!(
            BodyCatalog::new(eccentric),
            Err(ConfigError::InvalidEccentricity { .. })
        ));

        let negative = vec![
            OrbitalBody::new("sun", BodyKind::Star, 1.0),
            OrbitalBody::new("x", BodyKind::Planet, 1.0).with_orbit(-3.0, 1.0),
        ];
        assert!(matches!(
            BodyCatalog::new(negative),
            Err(ConfigError::NegativeOrbitRadius { .. })
        ));

        let duplicate = vec![
            OrbitalBody::new("sun", BodyKind::Star, 1.0)
                .with_satellites(vec![OrbitalBody::new("sun", BodyKind::Moon, 1.0).with_orbit(2.0, 1.0)]),
        ];
        assert!(matches!(BodyCatalog::new(duplicate), Err(ConfigError::DuplicateId(_))));

        let nan = vec![OrbitalBody::new("sun", BodyKind::Star, f32::NAN)];
        assert!(matches!(BodyCatalog::new(nan), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn manifest_covers_every_textured_body() {
        let catalog = BodyCatalog::builtin();
        let manifest = catalog.texture_manifest();
        assert_eq!(manifest.textures.len(), catalog.len() + 1);
        assert!(manifest.texture_slot("saturn").is_some());
        assert!(manifest.texture_slot(SUN_ALT_TEXTURE).is_some());
    }

    #[test]
    fn hash_deterministic() {
        assert_eq!(body_hash(42), body_hash(42));
        assert_ne!(body_hash(0), body_hash(1));
        assert_ne!(id_seed("io"), id_seed("oi"));
    }
}
