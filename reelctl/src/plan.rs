use reel_core::{Carousel, Projector, TrackSlot, TransitionStyle, WrapMode};
use serde::Serialize;

/// Static layout of a mounted carousel.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub items: usize,
    pub wrap_mode: WrapMode,
    pub visible_items: usize,
    pub max_speed: usize,
    pub copies_per_side: usize,
    pub slot_count: usize,
    pub canonical_base: i64,
    pub initial_index: i64,
    /// Inclusive range of committed indices.
    pub bounds: [i64; 2],
    pub transition: TransitionStyle,
    pub transition_css: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<TrackSlot>>,
}

impl PlanReport {
    pub fn new(carousel: &Carousel, include_slots: bool) -> Self {
        let settings = carousel.settings();
        let space = carousel.space();
        let bounds = space.bounds();
        let transition =
            Projector::new(settings.transition_duration, settings.easing)
                .transition_style(true, false);

        Self {
            items: carousel.len(),
            wrap_mode: settings.wrap_mode,
            visible_items: settings.visible_items,
            max_speed: settings.max_speed_for(carousel.len()),
            copies_per_side: space.copies_before(),
            slot_count: space.slot_count(),
            canonical_base: space.canonical_base(),
            initial_index: space.initial_index(),
            bounds: [*bounds.start(), *bounds.end()],
            transition,
            transition_css: transition.css(),
            slots: include_slots.then(|| carousel.slots()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::CarouselSettings;

    #[test]
    fn infinite_plan_reports_pool_geometry() {
        let carousel =
            Carousel::new(5, CarouselSettings::infinite()).unwrap();
        let plan = PlanReport::new(&carousel, true);
        assert_eq!(plan.copies_per_side, 1);
        assert_eq!(plan.slot_count, 15);
        assert_eq!(plan.initial_index, 5);
        assert_eq!(plan.bounds, [0, 14]);
        assert_eq!(plan.max_speed, 2);
        assert_eq!(plan.slots.as_ref().map(Vec::len), Some(15));
        assert_eq!(
            plan.transition_css,
            "transform 300ms cubic-bezier(0.65, 0, 0.35, 1)"
        );
    }

    #[test]
    fn finite_plan_without_slots() {
        let settings = CarouselSettings::default().with_visible_items(2);
        let carousel = Carousel::new(5, settings).unwrap();
        let plan = PlanReport::new(&carousel, false);
        assert_eq!(plan.bounds, [0, 3]);
        assert_eq!(plan.initial_index, 0);
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("slots").is_none());
        assert_eq!(json["wrap_mode"], "finite");
    }
}
