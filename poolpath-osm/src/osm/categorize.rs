use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // highway values that are not part of the drivable street network
    static ref EXCLUDED_HIGHWAY_RE: Regex = Regex::new(
        r"^(abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|steps|track)$"
    )
    .unwrap();
    // service values of parking lots, driveways and similar
    static ref EXCLUDED_SERVICE_RE: Regex =
        Regex::new(r"^(alley|driveway|emergency_access|parking|parking_aisle|private)$").unwrap();
}

// RoadProperties collects the tags of a way that decide whether cars can use it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoadProperties {
    pub highway: bool,
    pub excluded: bool,
}

impl RoadProperties {
    pub fn from_tags<'a, I>(tags: I) -> RoadProperties
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut properties = RoadProperties::default();
        for (key, val) in tags {
            properties.update(key, val);
        }
        properties
    }

    pub fn update(&mut self, key: &str, val: &str) {
        match key {
            "highway" => {
                self.highway = true;
                if EXCLUDED_HIGHWAY_RE.is_match(val) {
                    self.excluded = true;
                }
            }
            "area" => {
                if val == "yes" {
                    self.excluded = true;
                }
            }
            "access" => {
                if val == "private" {
                    self.excluded = true;
                }
            }
            "motor_vehicle" | "motorcar" => {
                if val == "no" {
                    self.excluded = true;
                }
            }
            "service" => {
                if EXCLUDED_SERVICE_RE.is_match(val) {
                    self.excluded = true;
                }
            }
            _ => {}
        }
    }

    // Drivable means the way is a street and no tag forbids cars on it
    pub fn drivable(self) -> bool {
        self.highway && !self.excluded
    }
}

#[test]
fn test_drivable() {
    let p = RoadProperties::default();
    assert!(!p.drivable());

    let p = RoadProperties::from_tags([("highway", "residential"), ("name", "Königstraße")]);
    assert!(p.drivable());

    let p = RoadProperties::from_tags([("name", "Königstraße")]);
    assert!(!p.drivable());
}

#[test]
fn test_update() {
    let mut p = RoadProperties::default();
    p.update("highway", "primary");
    assert!(p.drivable());

    p.update("maxspeed", "50");
    assert!(p.drivable());

    p.update("service", "drive-through");
    assert!(p.drivable());

    p.update("service", "parking_aisle");
    assert!(!p.drivable());
}

#[test]
fn test_excluded_tags() {
    let excluded = [
        ("highway", "footway"),
        ("highway", "service"),
        ("highway", "no"),
        ("area", "yes"),
        ("access", "private"),
        ("motor_vehicle", "no"),
        ("motorcar", "no"),
        ("service", "driveway"),
    ];
    for (key, val) in excluded {
        let p = RoadProperties::from_tags([("highway", "tertiary"), (key, val)]);
        assert!(!p.drivable(), "{}={} should not be drivable", key, val);
    }
}

#[test]
fn test_values_match_whole_words() {
    assert!(RoadProperties::from_tags([("highway", "motorway_link")]).drivable());
    assert!(RoadProperties::from_tags([("highway", "secondary")]).drivable());
    assert!(RoadProperties::from_tags([("highway", "unclassified")]).drivable());
    assert!(RoadProperties::from_tags([("highway", "living_street"), ("access", "yes")]).drivable());
}
