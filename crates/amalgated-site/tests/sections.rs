//! Entrance timing of the denser sections, read off their reveal plans.

use std::rc::Rc;

use amalgated_core::prelude::*;
use amalgated_site::AssetRegistry;
use amalgated_site::sections::{
    BusinessModelsSection, SectionCtx, ServicesSection, VisionMissionSection,
};

fn ctx(height: f32) -> SectionCtx {
    let (frames, _clock) = FrameLoop::manual();
    let viewport = Rc::new(ScrollViewport::new(1280.0, 800.0));
    SectionCtx {
        host: viewport.clone(),
        observer: viewport,
        scheduler: frames,
        assets: Rc::new(AssetRegistry::bundled("/assets")),
        rect: Rect::new(0.0, 0.0, 1280.0, height),
        copyright_year: None,
    }
}

fn delay_of(r: &RevealChoreographer, key: &str) -> u128 {
    r.plan()
        .into_iter()
        .find(|p| p.key == key)
        .map(|p| p.delay.as_millis())
        .unwrap_or_else(|| panic!("no reveal node '{key}'"))
}

fn child_delays(r: &RevealChoreographer, parent: &str) -> Vec<u128> {
    r.children_of(parent)
        .iter()
        .map(|k| delay_of(r, k))
        .collect()
}

#[test]
fn vision_cards_follow_their_blocks() {
    let section = VisionMissionSection::mount(&ctx(1400.0));
    let r = section.reveal();

    assert_eq!(child_delays(r, "vision-philosophy"), [120, 180, 240, 300]);
    let values = child_delays(r, "vision-core");
    assert_eq!(values.len(), 7);
    assert_eq!(values[..3], [280, 330, 380]);
    assert_eq!(delay_of(r, "vision-intro"), 100);
}

#[test]
fn business_lists_wait_for_their_blocks() {
    let section = BusinessModelsSection::mount(&ctx(1600.0));
    let r = section.reveal();

    assert_eq!(delay_of(r, "re-heading"), 250);
    assert_eq!(delay_of(r, "re-image-main"), 200);
    assert_eq!(delay_of(r, "retail-image"), 280);
    assert_eq!(delay_of(r, "retail-heading"), 300);

    let services = child_delays(r, "re-services");
    assert_eq!(services[..3], [300, 340, 380]);
    let retail = child_delays(r, "retail-services");
    assert_eq!(retail[..3], [350, 390, 430]);

    assert_eq!(delay_of(r, "re-companies"), 550);
    assert_eq!(child_delays(r, "re-company-list")[..2], [600, 650]);
    assert_eq!(delay_of(r, "retail-brands"), 600);
    assert_eq!(child_delays(r, "retail-brand-list")[..2], [650, 700]);
}

#[test]
fn service_items_stagger_within_each_card() {
    let section = ServicesSection::mount(&ctx(800.0));
    let r = section.reveal();

    let cards = r.children_of("services-categories");
    assert!(cards.len() >= 2);
    for (i, card) in cards.iter().enumerate() {
        let i = i as u128;
        assert_eq!(delay_of(r, card), 100 + 80 * i);
        assert_eq!(delay_of(r, &format!("{card}-accent")), 200 + 80 * i);
        let items = child_delays(r, &format!("{card}-items"));
        for (j, d) in items.iter().enumerate() {
            assert_eq!(*d, 250 + 80 * i + 30 * j as u128);
        }
    }
}
