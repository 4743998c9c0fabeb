pub mod snake;
pub mod tictactoe;
