//! egui front end.
//!
//! Click one of the side to move's pieces, then one of its highlighted
//! destinations. `Z` or `Backspace` takes a move back, `N` starts a new
//! game. All pixel math stays in this module.

use tracing::debug;

use crate::{Color, Game, PieceType, Square};

const LIGHT_SQUARE: egui::Color32 = egui::Color32::from_rgb(240, 217, 181);
const DARK_SQUARE: egui::Color32 = egui::Color32::from_rgb(181, 136, 99);
const SELECTED_SQUARE: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const CHECKED_KING: egui::Color32 = egui::Color32::from_rgb(220, 80, 80);

pub struct ChessGUI {
    game: Game,
    /// The origin square picked by the first click
    selected_square: Option<Square>,
    /// Which side is drawn at the bottom
    view_color: Color,
}

impl ChessGUI {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            selected_square: None,
            view_color: Color::White,
        }
    }

    fn handle_square_click(&mut self, square: Square) {
        if self.game.is_over() {
            return;
        }

        if let Some(from) = self.selected_square.take() {
            if self.game.legal_destinations(from).contains(&square) {
                if let Err(e) = self.game.try_move(from, square) {
                    debug!("move rejected: {}", e);
                }
                return;
            }
        }

        // Select the square if it holds a piece of the side to move
        let side = self.game.side_to_move();
        if matches!(self.game.board().get(square), Some(piece) if piece.color == side) {
            self.selected_square = Some(square);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Z) || i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::N),
            )
        });

        if undo {
            self.game.undo();
            self.selected_square = None;
        }
        if new_game {
            self.game = Game::new();
            self.selected_square = None;
        }
    }

    fn draw_board(&mut self, ui: &mut egui::Ui) {
        let board_size = ui.available_width().min(ui.available_height()) - 20.0;
        let square_size = board_size / 8.0;

        let board_rect =
            egui::Rect::from_min_size(ui.cursor().min, egui::vec2(board_size, board_size));
        let board_response = ui.allocate_rect(board_rect, egui::Sense::click());

        let targets = match self.selected_square {
            Some(from) => self.game.legal_destinations(from),
            None => Vec::new(),
        };
        let side = self.game.side_to_move();
        let checked_king = if self.game.in_check(side) {
            Some(self.game.position().king_square(side))
        } else {
            None
        };

        for square in Square::all() {
            let (display_row, display_col) = to_display(square, self.view_color);
            let rect = egui::Rect::from_min_size(
                egui::pos2(
                    board_rect.min.x + display_col as f32 * square_size,
                    board_rect.min.y + display_row as f32 * square_size,
                ),
                egui::vec2(square_size, square_size),
            );

            let is_light = (square.row() + square.col()) % 2 == 0;
            let color = if Some(square) == self.selected_square {
                SELECTED_SQUARE
            } else if Some(square) == checked_king {
                CHECKED_KING
            } else if is_light {
                LIGHT_SQUARE
            } else {
                DARK_SQUARE
            };
            ui.painter().rect_filled(rect, 0.0, color);

            if let Some(piece) = self.game.board().get(square) {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    piece_glyph(piece.piece_type, piece.color),
                    egui::FontId::proportional(square_size * 0.8),
                    if piece.color == Color::White {
                        egui::Color32::WHITE
                    } else {
                        egui::Color32::BLACK
                    },
                );
            }

            if targets.contains(&square) {
                ui.painter().circle_filled(
                    rect.center(),
                    square_size * 0.15,
                    egui::Color32::from_rgba_unmultiplied(40, 40, 40, 120),
                );
            }
        }

        if board_response.clicked() {
            if let Some(mouse_pos) = board_response.interact_pointer_pos() {
                let offset = mouse_pos - board_rect.min;
                let view = self.view_color;
                if let Some(square) = pixel_to_square(offset.x, offset.y, square_size, view) {
                    self.handle_square_click(square);
                }
            }
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("New game").clicked() {
                self.game = Game::new();
                self.selected_square = None;
            }
            if ui.button("Undo").clicked() {
                self.game.undo();
                self.selected_square = None;
            }
            if ui.button("View as White").clicked() {
                self.view_color = Color::White;
            }
            if ui.button("View as Black").clicked() {
                self.view_color = Color::Black;
            }
            ui.separator();
            ui.label(status_text(&self.game));
        });
    }
}

impl eframe::App for ChessGUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::containers::panel::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.draw_controls(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ui);
        });
    }
}

/// Screen row/column of `square` when `view_color` sits at the bottom.
fn to_display(square: Square, view_color: Color) -> (usize, usize) {
    match view_color {
        Color::White => (square.row(), square.col()),
        Color::Black => (7 - square.row(), 7 - square.col()),
    }
}

/// Maps a click offset inside the board to the square under it.
///
/// # Arguments
///
/// * `x`, `y` - Offset from the board's top-left corner in points
/// * `square_size` - Edge length of one square in points
/// * `view_color` - The side drawn at the bottom
///
/// # Returns
///
/// * The clicked square, or `None` outside the board
fn pixel_to_square(x: f32, y: f32, square_size: f32, view_color: Color) -> Option<Square> {
    if x < 0.0 || y < 0.0 || square_size <= 0.0 {
        return None;
    }
    let display_col = (x / square_size) as i32;
    let display_row = (y / square_size) as i32;
    let (row, col) = match view_color {
        Color::White => (display_row, display_col),
        Color::Black => (7 - display_row, 7 - display_col),
    };
    Square::new(row, col).ok()
}

fn piece_glyph(piece_type: PieceType, color: Color) -> &'static str {
    match (piece_type, color) {
        (PieceType::Pawn, Color::White) => "♙",
        (PieceType::Knight, Color::White) => "♘",
        (PieceType::Bishop, Color::White) => "♗",
        (PieceType::Rook, Color::White) => "♖",
        (PieceType::Queen, Color::White) => "♕",
        (PieceType::King, Color::White) => "♔",
        (PieceType::Pawn, Color::Black) => "♟",
        (PieceType::Knight, Color::Black) => "♞",
        (PieceType::Bishop, Color::Black) => "♝",
        (PieceType::Rook, Color::Black) => "♜",
        (PieceType::Queen, Color::Black) => "♛",
        (PieceType::King, Color::Black) => "♚",
    }
}

fn status_text(game: &Game) -> String {
    let side = game.side_to_move();
    if game.is_checkmate() {
        format!("Checkmate, {} wins", side.opposite())
    } else if game.is_stalemate() {
        "Stalemate".to_string()
    } else if game.in_check(side) {
        format!("{} to move (check)", side)
    } else {
        format!("{} to move", side)
    }
}

pub fn run_gui(game: Game) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(640.0, 680.0)),
        ..Default::default()
    };
    eframe::run_native(
        "chess_tracker",
        options,
        Box::new(|_cc| Box::new(ChessGUI::new(game))),
    )
}
