//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Placement of the current player's mark at a (row, column) coordinate.
///
/// Rows and columns are indexed 0-2 from the top-left corner. An action is
/// legal when the target cell is empty and the game is not over; legality is
/// checked by [`GameState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Row-major cell index (0-8) for in-bounds coordinates
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    /// Inverse of [`index`](Self::index)
    pub fn from_index(index: usize) -> Self {
        Action {
            row: index / 3,
            col: index % 3,
        }
    }

    fn in_bounds(self) -> bool {
        self.row < 3 && self.col < 3
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Complete board state including cells and whose turn it is
///
/// This type implements `Copy` since it's only 10 bytes (9 bytes for cells
/// plus 1 byte for the player enum). It is a value type: [`apply`] returns a
/// new state and never mutates the receiver, so states can be shared freely
/// across the search recursion.
///
/// [`apply`]: Self::apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub cells: [Cell; 9],
    pub to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
    empty: usize,
}

impl GameState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with a specified player to move first.
    ///
    /// Standard games open with X, but the shell lets the agent's side open,
    /// so O-first games are supported throughout. Piece-count validation in
    /// [`from_string`](Self::from_string) accepts both turn structures.
    pub fn new_with_player(first_player: Player) -> Self {
        GameState {
            cells: [Cell::Empty; 9],
            to_move: first_player,
        }
    }

    /// Helper: Parse 9 cells from a slice of characters.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 characters or any character is invalid.
    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; 9], crate::Error> {
        if chars.len() < 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().take(9).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }

        Ok(cells)
    }

    /// Helper: Count pieces on the board.
    fn count_pieces(cells: &[Cell; 9]) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in cells {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// Helper: Parse a player string ("X" or "O").
    fn parse_player(player_str: &str, context: &str) -> Result<Player, crate::Error> {
        match player_str {
            "X" => Ok(Player::X),
            "O" => Ok(Player::O),
            _ => Err(crate::Error::InvalidPlayerString {
                player: player_str.to_string(),
                context: context.to_string(),
            }),
        }
    }

    fn determine_turn_from_counts(count: &PieceCount) -> Result<Player, crate::Error> {
        if count.x == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    fn ensure_turn_consistent_with_counts(
        count: &PieceCount,
        player: Player,
        context: &str,
    ) -> Result<(), crate::Error> {
        let valid = match player {
            Player::X => count.x == count.o || count.o == count.x + 1,
            Player::O => count.x == count.o || count.x == count.o + 1,
        };

        if valid {
            Ok(())
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "piece counts (X={}, O={}) are inconsistent with {} to move in '{}'",
                    count.x, count.o, player, context
                ),
            })
        }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 characters (whitespace is filtered out,
    /// `/` row separators are accepted) and may optionally include a suffix
    /// `_X` or `_O` to explicitly set the player to move. When the suffix is
    /// omitted, the player is inferred from the piece counts, defaulting to
    /// X-first semantics for ambiguous cases.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board part has fewer than 9 non-whitespace characters
    /// - Any character is not a valid cell representation
    /// - The piece counts are invalid (difference greater than 1)
    /// - A provided `_X`/`_O` suffix conflicts with the piece counts
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_minimax::tictactoe::{GameState, Player};
    ///
    /// let state = GameState::from_string("XX.OO....").unwrap();
    /// assert_eq!(state.to_move, Player::X);
    ///
    /// // O to move with equal counts is an O-first game
    /// let state = GameState::from_string("XX.OO...._O").unwrap();
    /// assert_eq!(state.to_move, Player::O);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        let (board_part, specified_turn) = Self::split_board_and_turn(&cleaned)?;
        let chars: Vec<char> = board_part.chars().collect();
        let cells = Self::parse_cells(&chars, s)?;
        let count = Self::count_pieces(&cells);

        let to_move = if let Some(turn) = specified_turn {
            Self::ensure_turn_consistent_with_counts(&count, turn, s).map(|_| turn)?
        } else {
            Self::determine_turn_from_counts(&count)?
        };

        Ok(GameState { cells, to_move })
    }

    fn split_board_and_turn(cleaned: &str) -> Result<(&str, Option<Player>), crate::Error> {
        // '_' doubles as an empty-cell character, so only a trailing
        // single-character suffix is treated as a turn marker
        if cleaned.len() >= 2 && cleaned.as_bytes()[cleaned.len() - 2] == b'_' {
            let board = &cleaned[..cleaned.len() - 2];
            let suffix = &cleaned[cleaned.len() - 1..];
            let player = Self::parse_player(suffix, cleaned)?;
            Ok((board, Some(player)))
        } else {
            Ok((cleaned, None))
        }
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Get cell at a (row, col) coordinate
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * 3 + col]
    }

    /// Check if a cell is empty
    pub fn is_empty_at(&self, action: Action) -> bool {
        self.cells[action.index()] == Cell::Empty
    }

    /// Get every legal action in this position.
    ///
    /// Actions enumerate empty cells in row-major order: (0,0), (0,1),
    /// (0,2), (1,0), and so on. The fixed order keeps search tie-breaking
    /// and node-count metrics reproducible. The result is empty iff the
    /// state is terminal.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Action::from_index(i))
            .collect()
    }

    /// Place the current player's mark and return the successor state.
    ///
    /// The receiver is unchanged; the returned state has the mark placed and
    /// the mover switched.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the state is already terminal
    /// - [`Error::InvalidPosition`] if the coordinates are out of range
    /// - [`Error::OccupiedCell`] if the target cell is not empty
    ///
    /// [`Error::GameOver`]: crate::Error::GameOver
    /// [`Error::InvalidPosition`]: crate::Error::InvalidPosition
    /// [`Error::OccupiedCell`]: crate::Error::OccupiedCell
    #[must_use = "apply returns a new state; the original is unchanged"]
    pub fn apply(&self, action: Action) -> Result<GameState, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }

        if !action.in_bounds() {
            return Err(crate::Error::InvalidPosition {
                row: action.row,
                col: action.col,
            });
        }

        if !self.is_empty_at(action) {
            return Err(crate::Error::OccupiedCell {
                row: action.row,
                col: action.col,
            });
        }

        let mut new_state = *self;
        new_state.cells[action.index()] = self.to_move.to_cell();
        new_state.to_move = self.to_move.opponent();
        Ok(new_state)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        super::lines::LineAnalyzer::has_won(&self.cells, player)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.has_won(Player::X) || self.has_won(Player::O) || !self.cells.contains(&Cell::Empty)
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty) && self.winner().is_none()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Utility of a terminal state: +1 if X has a winning line, -1 if O has
    /// one, 0 for a draw.
    ///
    /// # Errors
    ///
    /// Calling this on a non-terminal state is a caller bug and fails fast
    /// with [`Error::NonTerminalUtility`].
    ///
    /// [`Error::NonTerminalUtility`]: crate::Error::NonTerminalUtility
    pub fn utility(&self) -> Result<i32, crate::Error> {
        if !self.is_terminal() {
            return Err(crate::Error::NonTerminalUtility);
        }
        Ok(match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        })
    }

    /// Get a canonical string representation for use as a key
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move
        )
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
