//! Star rating widget.
//!
//! Each `.rating-stars` container is one widget. Icons carry two flags:
//! `filled` (the committed rating, set by click) and `hover` (a preview
//! following the pointer, cleared when it leaves the container).

use std::rc::Rc;

use turbo_observability::StructuredLogger;

use crate::config::InteractionConfig;
use crate::dom::{Dom, DomEvent, EventKind};

pub const FILLED_CLASS: &str = "filled";
pub const HOVER_CLASS: &str = "hover";

/// Set `class` on icons `1..=rating` and clear it on the rest.
pub fn paint<D: Dom>(dom: &D, stars: &[D::Node], rating: usize, class: &str) {
    for (index, star) in stars.iter().enumerate() {
        if index < rating {
            dom.add_class(star, class);
        } else {
            dom.remove_class(star, class);
        }
    }
}

/// Commit `rating` (1-based): write the hidden field and fill the icons.
pub fn select<D: Dom>(dom: &D, stars: &[D::Node], field_id: &str, rating: usize) {
    if let Some(field) = dom.element_by_id(field_id) {
        dom.set_value(&field, &rating.to_string());
    }
    paint(dom, stars, rating, FILLED_CLASS);
}

/// Bind every rating widget. Returns how many widgets were bound.
pub fn install<D: Dom>(
    dom: &Rc<D>,
    config: &InteractionConfig,
    logger: &StructuredLogger,
) -> usize {
    let logger = logger.for_component("rating");
    let mut bound = 0;

    for container in dom.query_all(&config.selectors.rating_container) {
        let stars: Rc<[D::Node]> = dom
            .query_within(&container, &config.selectors.rating_star)
            .into();
        if stars.is_empty() {
            continue;
        }

        // A re-rendered form keeps its submitted rating visible. The page has
        // one rating field, which belongs to the first widget.
        if bound == 0 {
            let existing = dom
                .element_by_id(&config.rating.field_id)
                .and_then(|field| dom.value(&field).trim().parse::<usize>().ok())
                .filter(|rating| (1..=stars.len()).contains(rating));
            if let Some(rating) = existing {
                paint(&**dom, &stars, rating, FILLED_CLASS);
            }
        }

        for (index, star) in stars.iter().enumerate() {
            let rating = index + 1;

            let weak = Rc::downgrade(dom);
            let all = stars.clone();
            let field_id = config.rating.field_id.clone();
            let click_logger = logger.clone();
            dom.listen(
                star,
                EventKind::Click,
                Rc::new(move |_: &DomEvent<D::Node>| {
                    if let Some(dom) = weak.upgrade() {
                        select(&*dom, &all, &field_id, rating);
                        click_logger
                            .debug_builder("Rating selected")
                            .field_i64("rating", rating as i64)
                            .emit();
                    }
                }),
            );

            let weak = Rc::downgrade(dom);
            let all = stars.clone();
            dom.listen(
                star,
                EventKind::MouseEnter,
                Rc::new(move |_: &DomEvent<D::Node>| {
                    if let Some(dom) = weak.upgrade() {
                        paint(&*dom, &all, rating, HOVER_CLASS);
                    }
                }),
            );
        }

        let weak = Rc::downgrade(dom);
        let all = stars.clone();
        dom.listen(
            &container,
            EventKind::MouseLeave,
            Rc::new(move |_: &DomEvent<D::Node>| {
                if let Some(dom) = weak.upgrade() {
                    paint(&*dom, &all, 0, HOVER_CLASS);
                }
            }),
        );
        bound += 1;
    }

    bound
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryDom, NodeId};

    fn widget(dom: &MemoryDom, count: usize) -> (NodeId, Vec<NodeId>) {
        let container = dom.element("div").class("rating-stars").in_body();
        let stars = (0..count)
            .map(|_| dom.element("span").class("star").text("\u{2605}").child_of(container))
            .collect();
        (container, stars)
    }

    fn flags(dom: &MemoryDom, stars: &[NodeId], class: &str) -> Vec<bool> {
        stars.iter().map(|s| dom.has_class(s, class)).collect()
    }

    #[test]
    fn test_click_sets_field_and_fills() {
        let dom = Rc::new(MemoryDom::new());
        let (_, stars) = widget(&dom, 5);
        let field = dom.element("input").attr("type", "hidden").id("id_rating").in_body();
        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 1);

        dom.click(stars[2]);
        assert_eq!(dom.value(&field), "3");
        assert_eq!(flags(&dom, &stars, FILLED_CLASS), vec![true, true, true, false, false]);

        dom.click(stars[0]);
        assert_eq!(dom.value(&field), "1");
        assert_eq!(flags(&dom, &stars, FILLED_CLASS), vec![true, false, false, false, false]);
    }

    #[test]
    fn test_hover_preview_clears_on_leave() {
        let dom = Rc::new(MemoryDom::new());
        let (container, stars) = widget(&dom, 5);
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        dom.hover(stars[3]);
        assert_eq!(flags(&dom, &stars, HOVER_CLASS), vec![true, true, true, true, false]);
        assert_eq!(flags(&dom, &stars, FILLED_CLASS), vec![false; 5]);

        dom.hover(stars[1]);
        assert_eq!(flags(&dom, &stars, HOVER_CLASS), vec![true, true, false, false, false]);

        dom.leave(container);
        assert_eq!(flags(&dom, &stars, HOVER_CLASS), vec![false; 5]);
    }

    #[test]
    fn test_click_without_field_still_paints() {
        let dom = Rc::new(MemoryDom::new());
        let (_, stars) = widget(&dom, 3);
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        dom.click(stars[1]);
        assert_eq!(flags(&dom, &stars, FILLED_CLASS), vec![true, true, false]);
    }

    #[test]
    fn test_existing_field_value_is_painted() {
        let dom = Rc::new(MemoryDom::new());
        let (_, stars) = widget(&dom, 5);
        dom.element("input").id("id_rating").value("4").in_body();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));
        assert_eq!(flags(&dom, &stars, FILLED_CLASS), vec![true, true, true, true, false]);
    }

    #[test]
    fn test_widgets_are_independent() {
        let dom = Rc::new(MemoryDom::new());
        let (_, first) = widget(&dom, 5);
        let (_, second) = widget(&dom, 5);
        dom.element("div").class("rating-stars").in_body();
        assert_eq!(install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test")), 2);

        dom.click(second[4]);
        assert_eq!(flags(&dom, &first, FILLED_CLASS), vec![false; 5]);
        assert_eq!(flags(&dom, &second, FILLED_CLASS), vec![true; 5]);
    }

    #[test]
    fn test_existing_value_paints_only_the_first_widget() {
        let dom = Rc::new(MemoryDom::new());
        let (_, first) = widget(&dom, 5);
        let (_, second) = widget(&dom, 5);
        dom.element("input").id("id_rating").value("2").in_body();
        install(&dom, &InteractionConfig::default(), &StructuredLogger::new("test"));

        assert_eq!(flags(&dom, &first, FILLED_CLASS), vec![true, true, false, false, false]);
        assert_eq!(flags(&dom, &second, FILLED_CLASS), vec![false; 5]);
    }
}
