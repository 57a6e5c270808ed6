//! Food-web builder — validates predator→prey links against trophic levels.
//!
//! The learner clicks a prey organism, then the organism that eats it.
//! A link is accepted only when the pairing matches the rule table:
//!
//! | prey        | allowed predator |
//! |-------------|------------------|
//! | producer    | herbivore        |
//! | herbivore   | carnivore        |
//! | carnivore   | carnivore        |
//! | any         | decomposer       |
//!
//! Rejections are guided-discovery feedback, not errors.

use serde::{Deserialize, Serialize};

/// Position of an organism in the feeding hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrophicType {
    Producer,
    Herbivore,
    Carnivore,
    Decomposer,
}

impl TrophicType {
    pub fn label(self) -> &'static str {
        match self {
            TrophicType::Producer => "producer",
            TrophicType::Herbivore => "herbivore",
            TrophicType::Carnivore => "carnivore",
            TrophicType::Decomposer => "decomposer",
        }
    }
}

/// Can an organism of type `predator` feed on one of type `prey`?
pub fn is_valid_feeding(prey: TrophicType, predator: TrophicType) -> bool {
    use TrophicType::*;
    matches!(
        (prey, predator),
        (_, Decomposer) | (Producer, Herbivore) | (Herbivore, Carnivore) | (Carnivore, Carnivore)
    )
}

/// A node on the food-web diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub id: String,
    pub name: String,
    pub trophic: TrophicType,
    pub x: f32,
    pub y: f32,
}

impl Organism {
    fn new(id: &str, name: &str, trophic: TrophicType, x: f32, y: f32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            trophic,
            x,
            y,
        }
    }
}

/// The meadow ecosystem shown in the ecology lesson.
pub fn default_catalog() -> Vec<Organism> {
    use TrophicType::*;
    vec![
        Organism::new("grass", "Grass", Producer, 120.0, 340.0),
        Organism::new("clover", "Clover", Producer, 300.0, 340.0),
        Organism::new("rabbit", "Rabbit", Herbivore, 100.0, 220.0),
        Organism::new("grasshopper", "Grasshopper", Herbivore, 320.0, 220.0),
        Organism::new("frog", "Frog", Carnivore, 360.0, 120.0),
        Organism::new("fox", "Fox", Carnivore, 140.0, 100.0),
        Organism::new("hawk", "Hawk", Carnivore, 250.0, 30.0),
        Organism::new("mushroom", "Mushroom", Decomposer, 470.0, 300.0),
    ]
}

/// A confirmed link: `to` eats `from`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrophicEdge {
    pub from: String,
    pub to: String,
}

/// Result of one click on the diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// First click: the organism is now held as prey.
    Selected { id: String },
    /// The held organism was clicked again; selection cleared.
    Deselected,
    /// A new edge was added.
    Linked { edge: TrophicEdge, message: String },
    /// The pairing breaks the trophic rules.
    Rejected { message: String },
    /// The edge already exists.
    Duplicate { message: String },
    /// No organism with that id; state unchanged.
    UnknownOrganism { id: String },
}

/// Two-click food-web builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodWebBuilder {
    organisms: Vec<Organism>,
    edges: Vec<TrophicEdge>,
    selected: Option<String>,
}

impl Default for FoodWebBuilder {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl FoodWebBuilder {
    pub fn new(organisms: Vec<Organism>) -> Self {
        Self {
            organisms,
            edges: Vec::new(),
            selected: None,
        }
    }

    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    pub fn organism(&self, id: &str) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id == id)
    }

    pub fn edges(&self) -> &[TrophicEdge] {
        &self.edges
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.edges.iter().any(|e| e.from == from && e.to == to)
    }

    /// Handle a click on organism `id`.
    pub fn click(&mut self, id: &str) -> ClickOutcome {
        if self.organism(id).is_none() {
            return ClickOutcome::UnknownOrganism { id: id.to_string() };
        }

        match self.selected.take() {
            None => {
                self.selected = Some(id.to_string());
                ClickOutcome::Selected { id: id.to_string() }
            }
            Some(prey_id) if prey_id == id => ClickOutcome::Deselected,
            Some(prey_id) => self.try_link(&prey_id, id),
        }
    }

    /// Attempt `predator_id` eats `prey_id`. Selection is already cleared.
    fn try_link(&mut self, prey_id: &str, predator_id: &str) -> ClickOutcome {
        let (prey, predator) = match (self.organism(prey_id), self.organism(predator_id)) {
            (Some(p), Some(q)) => (p, q),
            _ => {
                return ClickOutcome::UnknownOrganism {
                    id: prey_id.to_string(),
                }
            }
        };

        if self.has_edge(prey_id, predator_id) {
            return ClickOutcome::Duplicate {
                message: format!(
                    "{} already eats {} in your food web.",
                    predator.name, prey.name
                ),
            };
        }

        if !is_valid_feeding(prey.trophic, predator.trophic) {
            return ClickOutcome::Rejected {
                message: format!(
                    "{} ({}) can't get its energy from {} ({}). Try another pairing.",
                    predator.name,
                    predator.trophic.label(),
                    prey.name,
                    prey.trophic.label()
                ),
            };
        }

        let message = format!("Correct! {} eats {}.", predator.name, prey.name);
        let edge = TrophicEdge {
            from: prey_id.to_string(),
            to: predator_id.to_string(),
        };
        self.edges.push(edge.clone());
        ClickOutcome::Linked { edge, message }
    }

    /// Ids of everything `id` eats.
    pub fn prey_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.to == id)
            .map(|e| e.from.as_str())
            .collect()
    }

    /// Ids of everything that eats `id`.
    pub fn predators_of(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| e.to.as_str())
            .collect()
    }

    /// Clear all edges and the selection.
    pub fn reset(&mut self) {
        self.edges.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(web: &mut FoodWebBuilder, prey: &str, predator: &str) -> ClickOutcome {
        web.click(prey);
        web.click(predator)
    }

    #[test]
    fn test_rule_table() {
        use TrophicType::*;
        assert!(is_valid_feeding(Producer, Herbivore));
        assert!(is_valid_feeding(Herbivore, Carnivore));
        assert!(is_valid_feeding(Carnivore, Carnivore));
        for prey in [Producer, Herbivore, Carnivore, Decomposer] {
            assert!(is_valid_feeding(prey, Decomposer));
        }
        assert!(!is_valid_feeding(Producer, Carnivore));
        assert!(!is_valid_feeding(Herbivore, Herbivore));
        assert!(!is_valid_feeding(Decomposer, Carnivore));
        assert!(!is_valid_feeding(Carnivore, Herbivore));
    }

    #[test]
    fn test_grass_to_rabbit_links() {
        let mut web = FoodWebBuilder::default();
        assert_eq!(
            web.click("grass"),
            ClickOutcome::Selected { id: "grass".into() }
        );
        match web.click("rabbit") {
            ClickOutcome::Linked { edge, message } => {
                assert_eq!(edge.from, "grass");
                assert_eq!(edge.to, "rabbit");
                assert_eq!(message, "Correct! Rabbit eats Grass.");
            }
            other => panic!("expected link, got {other:?}"),
        }
        assert!(web.has_edge("grass", "rabbit"));
        assert_eq!(web.selected(), None);
    }

    #[test]
    fn test_grass_to_fox_rejected() {
        let mut web = FoodWebBuilder::default();
        assert!(matches!(
            link(&mut web, "grass", "fox"),
            ClickOutcome::Rejected { .. }
        ));
        assert!(web.edges().is_empty());
        assert_eq!(web.selected(), None);
    }

    #[test]
    fn test_duplicate_rejected_distinctly() {
        let mut web = FoodWebBuilder::default();
        link(&mut web, "grass", "rabbit");
        match link(&mut web, "grass", "rabbit") {
            ClickOutcome::Duplicate { message } => assert!(message.contains("already")),
            other => panic!("expected duplicate, got {other:?}"),
        }
        assert_eq!(web.edges().len(), 1);
    }

    #[test]
    fn test_reverse_direction_is_distinct_edge() {
        let mut web = FoodWebBuilder::default();
        link(&mut web, "fox", "hawk");
        assert!(matches!(
            link(&mut web, "hawk", "fox"),
            ClickOutcome::Linked { .. }
        ));
        assert_eq!(web.edges().len(), 2);
    }

    #[test]
    fn test_click_selected_again_deselects() {
        let mut web = FoodWebBuilder::default();
        web.click("rabbit");
        assert_eq!(web.click("rabbit"), ClickOutcome::Deselected);
        assert_eq!(web.selected(), None);
        assert!(web.edges().is_empty());
        // next click starts a fresh selection
        assert_eq!(
            web.click("rabbit"),
            ClickOutcome::Selected {
                id: "rabbit".into(),
            }
        );
    }

    #[test]
    fn test_unknown_organism_keeps_selection() {
        let mut web = FoodWebBuilder::default();
        web.click("grass");
        assert_eq!(
            web.click("unicorn"),
            ClickOutcome::UnknownOrganism {
                id: "unicorn".into(),
            }
        );
        assert_eq!(web.selected(), Some("grass"));
    }

    #[test]
    fn test_anything_feeds_decomposer() {
        let mut web = FoodWebBuilder::default();
        for prey in ["grass", "rabbit", "fox"] {
            assert!(matches!(
                link(&mut web, prey, "mushroom"),
                ClickOutcome::Linked { .. }
            ));
        }
        assert_eq!(web.prey_of("mushroom"), vec!["grass", "rabbit", "fox"]);
    }

    #[test]
    fn test_queries_and_reset() {
        let mut web = FoodWebBuilder::default();
        link(&mut web, "grass", "rabbit");
        link(&mut web, "rabbit", "fox");
        link(&mut web, "rabbit", "hawk");
        assert_eq!(web.predators_of("rabbit"), vec!["fox", "hawk"]);
        assert_eq!(web.prey_of("rabbit"), vec!["grass"]);

        web.click("fox");
        web.reset();
        assert!(web.edges().is_empty());
        assert_eq!(web.selected(), None);
    }
}
