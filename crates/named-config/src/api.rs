//! Lookup, insert and remove by name
//!
//! Names are not unique in the model; lookups return the first match.

use crate::model::{Config, Options, TrustAnchors, View, Zone};

impl Config {
    /// First zone named `name`, top-level zones before zones inside views.
    pub fn get_zone(&self, name: &str) -> Option<&Zone> {
        self.zones
            .iter()
            .chain(self.views.iter().flat_map(|view| view.zones.iter()))
            .find(|zone| zone.name == name)
    }

    pub fn get_zone_mut(&mut self, name: &str) -> Option<&mut Zone> {
        self.zones
            .iter_mut()
            .chain(self.views.iter_mut().flat_map(|view| view.zones.iter_mut()))
            .find(|zone| zone.name == name)
    }

    /// Replace the top-level zone with the same name, or append.
    pub fn upsert_zone(&mut self, zone: Zone) {
        upsert(&mut self.zones, zone, |z| &z.name);
    }

    /// Remove every top-level zone named `name`; true if any was removed.
    pub fn remove_zone(&mut self, name: &str) -> bool {
        remove(&mut self.zones, name, |z| &z.name)
    }

    pub fn find_view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|view| view.name == name)
    }

    pub fn find_view_mut(&mut self, name: &str) -> Option<&mut View> {
        self.views.iter_mut().find(|view| view.name == name)
    }

    pub fn upsert_view(&mut self, view: View) {
        upsert(&mut self.views, view, |v| &v.name);
    }

    pub fn remove_view(&mut self, name: &str) -> bool {
        remove(&mut self.views, name, |v| &v.name)
    }

    /// Set global recursion, creating the options block if needed.
    pub fn set_recursion(&mut self, enabled: bool) {
        self.options.get_or_insert_with(Options::default).recursion = Some(enabled);
    }

    /// Replace or append a zone inside a view, creating the view if needed.
    pub fn upsert_zone_in_view(&mut self, view_name: &str, zone: Zone) {
        upsert(&mut self.view_entry(view_name).zones, zone, |z| &z.name);
    }

    /// Remove zones named `zone_name` from a view; false if the view or zone is absent.
    pub fn remove_zone_in_view(&mut self, view_name: &str, zone_name: &str) -> bool {
        self.find_view_mut(view_name)
            .is_some_and(|view| remove(&mut view.zones, zone_name, |z| &z.name))
    }

    /// Replace the trust anchors of a view, creating the view if needed.
    pub fn set_trust_anchors_in_view(&mut self, view_name: &str, anchors: TrustAnchors) {
        self.view_entry(view_name).trust_anchors = Some(anchors);
    }

    fn view_entry(&mut self, name: &str) -> &mut View {
        let index = match self.views.iter().position(|view| view.name == name) {
            Some(index) => index,
            None => {
                self.views.push(View::new(name));
                self.views.len() - 1
            }
        };
        &mut self.views[index]
    }
}

fn upsert<T>(items: &mut Vec<T>, item: T, name: impl Fn(&T) -> &String) {
    match items.iter_mut().find(|existing| name(existing) == name(&item)) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

fn remove<T>(items: &mut Vec<T>, target: &str, name: impl Fn(&T) -> &String) -> bool {
    let before = items.len();
    items.retain(|item| name(item) != target);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnchorRecord, TrustAnchor, ZoneType};

    fn config() -> Config {
        let mut config = Config::default();
        config.zones.push(Zone::new("a.example", ZoneType::Primary));
        let mut view = View::new("internal");
        view.zones.push(Zone::new("b.example", ZoneType::Secondary));
        view.zones.push(Zone::new("a.example", ZoneType::Hint));
        config.views.push(view);
        config
    }

    #[test]
    fn test_get_zone_prefers_top_level() {
        let config = config();
        assert_eq!(config.get_zone("a.example").unwrap().zone_type, Some(ZoneType::Primary));
        assert_eq!(config.get_zone("b.example").unwrap().zone_type, Some(ZoneType::Secondary));
        assert!(config.get_zone("c.example").is_none());
    }

    #[test]
    fn test_get_zone_mut_edits_in_view() {
        let mut config = config();
        config.get_zone_mut("b.example").unwrap().file = Some("b.db".into());
        assert_eq!(config.views[0].zones[0].file.as_deref(), Some("b.db"));
    }

    #[test]
    fn test_upsert_and_remove_zone() {
        let mut config = config();
        config.upsert_zone(Zone::new("a.example", ZoneType::Forward));
        config.upsert_zone(Zone::new("c.example", ZoneType::Stub));
        assert_eq!(config.zones.len(), 2);
        assert_eq!(config.zones[0].zone_type, Some(ZoneType::Forward));

        assert!(config.remove_zone("a.example"));
        assert!(!config.remove_zone("a.example"));
        assert_eq!(config.zones.len(), 1);
        assert_eq!(config.views[0].zones.len(), 2);
    }

    #[test]
    fn test_views() {
        let mut config = config();
        let mut replacement = View::new("internal");
        replacement.recursion = Some(false);
        config.upsert_view(replacement);
        assert_eq!(config.views.len(), 1);
        assert_eq!(config.find_view("internal").unwrap().recursion, Some(false));

        config.upsert_view(View::new("external"));
        assert!(config.remove_view("internal"));
        assert_eq!(config.views.len(), 1);
        assert!(config.find_view("internal").is_none());
    }

    #[test]
    fn test_set_recursion_creates_options() {
        let mut config = Config::default();
        config.set_recursion(false);
        assert_eq!(config.options.unwrap().recursion, Some(false));
    }

    #[test]
    fn test_zone_in_view_creates_view() {
        let mut config = Config::default();
        config.upsert_zone_in_view("dmz", Zone::new("d.example", ZoneType::Primary));
        config.upsert_zone_in_view("dmz", Zone::new("d.example", ZoneType::Mirror));
        let view = config.find_view("dmz").unwrap();
        assert_eq!(view.zones.len(), 1);
        assert_eq!(view.zones[0].zone_type, Some(ZoneType::Mirror));

        assert!(config.remove_zone_in_view("dmz", "d.example"));
        assert!(!config.remove_zone_in_view("dmz", "d.example"));
        assert!(!config.remove_zone_in_view("absent", "d.example"));
    }

    #[test]
    fn test_set_trust_anchors_in_view() {
        let mut config = config();
        let anchors = TrustAnchors {
            items: vec![TrustAnchor {
                name: ".".into(),
                record: AnchorRecord::Ds("static-ds 20326 8 2 \"E06D\"".into()),
            }],
            other: Vec::new(),
        };
        config.set_trust_anchors_in_view("internal", anchors.clone());
        config.set_trust_anchors_in_view("new", anchors.clone());
        assert_eq!(config.views.len(), 2);
        assert_eq!(config.find_view("new").unwrap().trust_anchors, Some(anchors));
    }
}
