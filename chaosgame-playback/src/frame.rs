use chaosgame_core::{GamePoint, Rgb, Session};

/// Assemble the render-ready point sequence for one frame.
///
/// Order is significant and fixed: the live cursor first, then the generated
/// cloud in generation order, then the confirmed anchors-plus-start tail.
/// Each new generated point is effectively inserted just before that
/// fixed-size tail, which is what keeps the anchors drawn on top of the
/// accumulating fractal. After the game finishes the tail is empty and the
/// cloud stands alone.
pub fn assemble_frame(session: &Session) -> Vec<GamePoint> {
    let generated = session.generated();
    let placed = session.placed();
    let mut points = Vec::with_capacity(1 + generated.len() + placed.len());
    points.push(session.cursor().clone());
    points.extend_from_slice(generated);
    points.extend_from_slice(placed);
    points
}

/// The hue-derived solid color for the current frame.
pub fn frame_color(session: &Session) -> Rgb {
    session.config().color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaosgame_core::{Phase, PlaybackConfig, Vec2};

    fn ready_session() -> Session {
        let config = PlaybackConfig::new(0, 0.0, 5).unwrap();
        let mut session = Session::new(3, config);
        session.pointer_clicked(Vec2::new(-1.0, -1.0));
        session.pointer_clicked(Vec2::new(1.0, -1.0));
        session.pointer_clicked(Vec2::new(0.0, 1.0));
        session.pointer_clicked(Vec2::ZERO);
        session
    }

    #[test]
    fn cursor_first_then_generated_then_tail() {
        let mut session = ready_session();
        session.request_run();
        session.step(0);
        session.step(1);

        let frame = assemble_frame(&session);
        // cursor + 2 generated + 3 anchors + start
        assert_eq!(frame.len(), 7);
        assert_eq!(frame[0].pos, session.cursor().pos);
        assert_eq!(frame[1].pos, session.generated()[0].pos);
        assert_eq!(frame[2].pos, session.generated()[1].pos);
        assert_eq!(frame[3].label.as_deref(), Some("A"));
        assert_eq!(frame[6].label.as_deref(), Some("Start"));
    }

    #[test]
    fn finished_frame_has_no_tail() {
        let mut session = ready_session();
        session.request_run();
        while session.phase() == Phase::Running {
            session.step(0);
        }
        let frame = assemble_frame(&session);
        // cursor + 5 generated, no anchors left.
        assert_eq!(frame.len(), 6);
        assert!(frame.iter().skip(1).all(|p| p.label.is_none()));
    }

    #[test]
    fn frame_color_follows_hue() {
        let mut session = ready_session();
        session.set_hue(120.0);
        assert_eq!(frame_color(&session), Rgb::new(0, 255, 0));
    }
}
