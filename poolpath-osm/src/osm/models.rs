use serde::{Deserialize, Serialize};

// OsmNode is an OpenStreetMap node referenced by at least one way
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsmNode {
    pub id: i64,
    pub lat: f64,
    pub long: f64,
}

// OsmWay is a road segment given as the ordered list of its node ids
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsmWay {
    pub id: i64,
    pub nodes: Vec<i64>,
}

/// Streets of one area: the ways and every node they reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementData {
    pub way_nodes: Vec<OsmNode>,
    pub ways: Vec<OsmWay>,
}

impl ElementData {
    pub fn extend(&mut self, other: ElementData) {
        self.way_nodes.extend(other.way_nodes);
        self.ways.extend(other.ways);
    }
}

impl FromIterator<ElementData> for ElementData {
    fn from_iter<I: IntoIterator<Item = ElementData>>(iter: I) -> Self {
        let mut result = ElementData::default();
        for part in iter {
            result.extend(part);
        }
        result
    }
}
