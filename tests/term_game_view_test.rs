use zonefall::core::{GameState, GameSnapshot};
use zonefall::session::{FlowConfig, MemoryStore, Session};
use zonefall::term::{color_rgb, AnchorY, FrameBuffer, GameView, Viewport, BONUS_RGB};
use zonefall::types::Color;

fn row_text(fb: &FrameBuffer, y: u16) -> String {
    (0..fb.width()).map(|x| fb.get(x, y).unwrap().ch).collect()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| row_text(fb, y)).collect::<Vec<_>>().join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 12*2 by 20*1 => 24x20
    // plus border => 26x22
    let vp = Viewport::new(26, 22);
    let fb = view.render(&snap, vp);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┏');
    assert_eq!(fb.get(25, 0).unwrap().ch, '┓');
    assert_eq!(fb.get(0, 21).unwrap().ch, '┗');
    assert_eq!(fb.get(25, 21).unwrap().ch, '┛');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][4] = Some(zonefall::core::CellView {
        color: Color::Blue,
        bonus: false,
    });

    let view = GameView::default();
    let fb = view.render(&snap, Viewport::new(26, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let x0 = 1 + 4 * 2;
    let y0 = 1 + 19;
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, color_rgb(Color::Blue));
    }
    // Empty neighbours show the zone grid
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn active_piece_turns_bonus_color_in_bonus_mode() {
    let mut game = GameState::new(9);
    game.start();
    game.force_bonus();
    let snap = game.snapshot();
    let cell = snap.active_cells()[0];

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(26, 22));

    let drawn = fb.get(1 + cell.x as u16 * 2, 1 + cell.y as u16).unwrap();
    assert_eq!(drawn.ch, '█');
    assert_eq!(drawn.style.fg, BONUS_RGB);
}

#[test]
fn side_panel_shows_score_and_bonus_label() {
    let mut snap = GameSnapshot::default();
    snap.score = 4200;
    snap.bonus.active = true;
    snap.bonus.remaining_fraction = 0.5;

    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(60, 24));
    let text = screen_text(&fb);

    assert!(text.contains("SCORE"));
    assert!(text.contains("0004200"));
    assert!(text.contains("BONUS!"));
}

#[test]
fn idle_session_shows_title_then_scoreboard() {
    let mut session = Session::new(1, MemoryStore::new(), FlowConfig::default());
    let view = GameView::default();
    let vp = Viewport::new(60, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    view.render_session_into(&session, vp, &mut fb);
    let text = screen_text(&fb);
    assert!(text.contains("ZONEFALL"));
    assert!(text.contains("PRESS ANY KEY"));

    // Idle rotates to the scoreboard after ten seconds
    for _ in 0..(10.5 * 60.0) as u32 {
        session.update(1.0 / 60.0);
    }
    view.render_session_into(&session, vp, &mut fb);
    let text = screen_text(&fb);
    assert!(text.contains("HIGH SCORES"));
    assert!(text.contains("NO SCORES YET"));
}

#[test]
fn intro_shows_countdown() {
    let mut session = Session::new(1, MemoryStore::new(), FlowConfig::default());
    session.press_start();
    session.update(0.1);

    let view = GameView::default();
    let vp = Viewport::new(60, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);
    view.render_session_into(&session, vp, &mut fb);
    assert!(screen_text(&fb).contains('3'));
}
