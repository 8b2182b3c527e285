// Selection transitions and the payloads they hand to the info panel.

use funnel_core::constants::PLACEHOLDER_TITLE;
use funnel_core::{Funnel, HighlightChange, InfoPayload, SelectionPresenter};

#[test]
fn starts_with_placeholder() {
    let funnel = Funnel::aarrr();
    let presenter = SelectionPresenter::new();
    let payload = presenter.payload(&funnel);
    assert_eq!(payload, InfoPayload::Empty);
    assert_eq!(payload.title(), PLACEHOLDER_TITLE);
}

#[test]
fn first_pick_sets_highlight_and_payload() {
    let funnel = Funnel::aarrr();
    let mut presenter = SelectionPresenter::new();
    let update = presenter.on_pick(Some(2), &funnel).unwrap();
    assert_eq!(
        update.highlight,
        HighlightChange {
            cleared: None,
            set: Some(2)
        }
    );
    let InfoPayload::Stage(info) = update.payload else {
        panic!("expected stage payload");
    };
    assert_eq!(info.number, "03");
    assert_eq!(info.title, "Retention");
    assert_eq!(info.description, "Continued Usage");
    assert_eq!(info.volume, "2,000");
    assert_eq!(info.rate, "40%");
    assert_eq!(info.channels, vec!["Email", "Push", "In-App"]);
    assert_eq!(presenter.selected(), Some(2));
}

#[test]
fn same_pick_is_a_no_op() {
    let funnel = Funnel::aarrr();
    let mut presenter = SelectionPresenter::new();
    assert!(presenter.on_pick(None, &funnel).is_none());
    presenter.on_pick(Some(1), &funnel);
    assert!(presenter.on_pick(Some(1), &funnel).is_none());
}

#[test]
fn switching_tiers_clears_previous() {
    let funnel = Funnel::aarrr();
    let mut presenter = SelectionPresenter::new();
    presenter.on_pick(Some(0), &funnel);
    let update = presenter.on_pick(Some(4), &funnel).unwrap();
    assert_eq!(update.highlight.cleared, Some(0));
    assert_eq!(update.highlight.set, Some(4));
    assert_eq!(update.payload.title(), "Revenue");
}

#[test]
fn leaving_restores_placeholder() {
    let funnel = Funnel::aarrr();
    let mut presenter = SelectionPresenter::new();
    presenter.on_pick(Some(3), &funnel);
    let update = presenter.clear(&funnel).unwrap();
    assert_eq!(update.highlight.cleared, Some(3));
    assert_eq!(update.highlight.set, None);
    assert_eq!(update.payload, InfoPayload::Empty);
    assert_eq!(presenter.selected(), None);
}
