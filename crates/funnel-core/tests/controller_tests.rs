// End-to-end command handling through the view controller.

use funnel_core::constants::PLACEHOLDER_TITLE;
use funnel_core::picker::pick;
use funnel_core::{
    focus_pose, target_transform, Camera, Command, Funnel, InfoPayload, InfoSurface, Stage,
    ViewController, ViewMode,
};
use glam::{Vec2, Vec3};

const ASPECT: f32 = 16.0 / 9.0;
const DT: f32 = 1.0 / 60.0;

#[derive(Default)]
struct Recorder {
    shown: Vec<InfoPayload>,
    hovering: Option<bool>,
}

impl InfoSurface for Recorder {
    fn show(&mut self, payload: &InfoPayload) {
        self.shown.push(payload.clone());
    }

    fn set_hovering(&mut self, hovering: bool) {
        self.hovering = Some(hovering);
    }
}

impl Recorder {
    fn last_title(&self) -> Option<&str> {
        self.shown.last().map(InfoPayload::title)
    }
}

fn ndc_of(camera: &Camera, world: Vec3) -> Vec2 {
    let clip = camera.view_projection() * world.extend(1.0);
    Vec2::new(clip.x / clip.w, clip.y / clip.w)
}

fn tier_two_ndc(view: &ViewController) -> Vec2 {
    let y = view.scene().tiers[2].transform.position.y;
    ndc_of(&view.scene().camera, Vec3::new(1.1, y - 0.5, 1.1))
}

fn run(view: &mut ViewController, surface: &mut Recorder, seconds: f32) {
    let steps = (seconds / DT).ceil() as usize;
    for _ in 0..steps {
        view.tick(DT, surface);
    }
}

fn assert_highlight_matches_selection(view: &ViewController) {
    let selected = view.state().selected_index;
    assert!(view.scene().highlighted_count() <= 1);
    for (i, tier) in view.scene().tiers.iter().enumerate() {
        assert_eq!(tier.highlighted, selected == Some(i), "tier {i}");
    }
}

#[test]
fn startup_shows_placeholder() {
    let view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    view.present(&mut surface);
    assert_eq!(surface.last_title(), Some(PLACEHOLDER_TITLE));
    assert_eq!(surface.hovering, Some(false));
    assert_eq!(view.state().mode, ViewMode::Pyramid);
    assert!(view.state().auto_rotate);
    assert_eq!(view.orbit().auto_rotate, view.state().auto_rotate);
    assert!(view.orbit().is_settled());
    assert_eq!(view.state().selected_index, None);
}

#[test]
fn hovering_tier_two_shows_retention() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    let ndc = tier_two_ndc(&view);
    view.dispatch(Command::PointerMove { ndc }, &mut surface);

    assert_eq!(view.state().selected_index, Some(2));
    assert_eq!(surface.last_title(), Some("Retention"));
    assert_eq!(surface.hovering, Some(true));
    assert_highlight_matches_selection(&view);

    // Same tier again: nothing new is pushed.
    let shown = surface.shown.len();
    view.dispatch(Command::PointerMove { ndc }, &mut surface);
    assert_eq!(surface.shown.len(), shown);
}

#[test]
fn leaving_the_pyramid_restores_placeholder() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    let ndc = tier_two_ndc(&view);
    view.dispatch(Command::PointerMove { ndc }, &mut surface);
    view.dispatch(
        Command::PointerMove {
            ndc: Vec2::new(0.0, 0.95),
        },
        &mut surface,
    );
    assert_eq!(view.state().selected_index, None);
    assert_eq!(surface.last_title(), Some(PLACEHOLDER_TITLE));
    assert_eq!(surface.hovering, Some(false));
    assert_eq!(view.scene().highlighted_count(), 0);

    view.dispatch(Command::PointerMove { ndc }, &mut surface);
    view.dispatch(Command::PointerLeave, &mut surface);
    assert_eq!(view.state().selected_index, None);
    assert_eq!(view.scene().highlighted_count(), 0);
}

#[test]
fn click_focuses_selected_tier() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    let ndc = tier_two_ndc(&view);
    view.dispatch(Command::PointerMove { ndc }, &mut surface);
    view.dispatch(Command::PointerClick, &mut surface);

    let y = view.scene().tiers[2].transform.position.y;
    assert_eq!(view.layout().camera_destination(), Some(focus_pose(y)));
}

#[test]
fn click_on_empty_space_does_nothing() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    view.dispatch(Command::PointerClick, &mut surface);
    view.dispatch(Command::FocusSelected, &mut surface);
    assert!(!view.layout().is_camera_animating());
}

#[test]
fn reset_returns_to_default_view() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    view.dispatch(Command::ToggleAutoRotate, &mut surface);
    assert!(!view.state().auto_rotate);
    assert!(!view.orbit().auto_rotate);

    view.dispatch(Command::SetMode(ViewMode::Flow), &mut surface);
    view.dispatch(Command::Orbit { azimuth: 0.4, polar: 0.1 }, &mut surface);
    view.dispatch(Command::Zoom { scale: 0.8 }, &mut surface);
    run(&mut view, &mut surface, 0.5);

    view.dispatch(Command::ResetView, &mut surface);
    assert_eq!(view.state().mode, ViewMode::Pyramid);
    assert_eq!(
        view.layout().camera_destination(),
        Some(Default::default())
    );
    run(&mut view, &mut surface, 2.0);

    let pose = view.scene().camera.pose();
    assert!((pose.eye - Vec3::new(8.0, 6.0, 8.0)).length() < 1e-4);
    assert!((pose.target - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-4);
    assert_eq!(view.state().camera_pose, pose);
    for (i, tier) in view.scene().tiers.iter().enumerate() {
        let target = target_transform(ViewMode::Pyramid, i, 5);
        assert!(tier.transform.max_abs_diff(&target) < 1e-4);
    }
}

#[test]
fn user_orbit_waits_for_camera_transition() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    view.dispatch(Command::ResetView, &mut surface);
    assert!(view.layout().is_camera_animating());
    view.dispatch(Command::Orbit { azimuth: 1.0, polar: 0.0 }, &mut surface);
    view.dispatch(Command::Zoom { scale: 0.5 }, &mut surface);
    assert!(view.orbit().is_settled());

    run(&mut view, &mut surface, 2.0);
    view.dispatch(Command::Orbit { azimuth: 1.0, polar: 0.0 }, &mut surface);
    assert!(!view.orbit().is_settled());
}

#[test]
fn selection_tracks_scene_motion() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    let ndc = tier_two_ndc(&view);
    view.dispatch(Command::PointerMove { ndc }, &mut surface);
    view.dispatch(Command::SetMode(ViewMode::Exploded), &mut surface);

    for _ in 0..150 {
        view.tick(DT, &mut surface);
        let scene = view.scene();
        let fresh = pick(ndc, &scene.camera, &scene.tiers);
        assert_eq!(view.state().selected_index, fresh);
        assert_highlight_matches_selection(&view);
    }
}

#[test]
fn panel_always_matches_selection() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    view.present(&mut surface);
    let path = [
        Vec2::new(-0.9, -0.9),
        tier_two_ndc(&view),
        Vec2::new(0.0, 0.0),
        Vec2::new(0.3, -0.4),
        Vec2::new(0.0, 0.95),
    ];
    for ndc in path {
        view.dispatch(Command::PointerMove { ndc }, &mut surface);
        run(&mut view, &mut surface, 0.1);
        let expected = view
            .state()
            .selected_index
            .and_then(|i| view.funnel().get(i))
            .map_or(PLACEHOLDER_TITLE, |s| s.name.as_str());
        assert_eq!(surface.last_title(), Some(expected));
        assert_eq!(surface.hovering, Some(view.state().selected_index.is_some()));
        assert_highlight_matches_selection(&view);
    }
}

#[test]
fn resize_updates_aspect() {
    let mut view = ViewController::new(Funnel::aarrr(), ASPECT);
    let mut surface = Recorder::default();
    view.dispatch(
        Command::Resize {
            width: 800,
            height: 400,
        },
        &mut surface,
    );
    assert!((view.scene().camera.aspect - 2.0).abs() < 1e-6);
    view.dispatch(Command::Resize { width: 0, height: 0 }, &mut surface);
    assert!(view.scene().camera.aspect > 0.0);
}

#[test]
fn empty_funnel_accepts_every_command() {
    let mut view = ViewController::new(Funnel::new(Vec::new()).unwrap(), ASPECT);
    let mut surface = Recorder::default();
    let commands = [
        Command::SetMode(ViewMode::Flow),
        Command::PointerMove { ndc: Vec2::ZERO },
        Command::PointerClick,
        Command::FocusSelected,
        Command::ToggleAutoRotate,
        Command::ResetView,
        Command::PointerLeave,
    ];
    for command in commands {
        view.dispatch(command, &mut surface);
        view.tick(DT, &mut surface);
    }
    assert_eq!(view.state().selected_index, None);
    assert!(view.scene().tiers.is_empty());
}

#[test]
fn single_stage_funnel_is_pickable() {
    let funnel = Funnel::new(vec![Stage::new("Only", "d", "1", "100%", &[])]).unwrap();
    let mut view = ViewController::new(funnel, ASPECT);
    let mut surface = Recorder::default();
    // The lone tier is a pyramid of height 6 centered on the origin.
    let ndc = ndc_of(&view.scene().camera, Vec3::new(0.5, 0.0, 0.5));
    view.dispatch(Command::PointerMove { ndc }, &mut surface);
    assert_eq!(view.state().selected_index, Some(0));
    assert_eq!(surface.last_title(), Some("Only"));

    view.dispatch(Command::SetMode(ViewMode::Flow), &mut surface);
    run(&mut view, &mut surface, 2.0);
    let p = view.scene().tiers[0].transform.position;
    assert!((p - Vec3::new(5.0, 2.0, 0.0)).length() < 1e-4);
}
