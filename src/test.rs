#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use proptest::prelude::*;

    use std::time::Duration;

    use crate::arena::{play_game, play_series};
    use crate::heuristic::*;
    use crate::solver::successors;
    use crate::*;

    // plays 0-indexed columns, skipping full ones and stopping once the game is decided
    fn board_from_columns(mut board: ArrayBoard, columns: &[usize]) -> ArrayBoard {
        for &column in columns {
            if board.outcome().is_over() {
                break;
            }
            if board.playable(column) {
                board.play(column);
            }
        }
        board
    }

    fn agent(max_depth: usize) -> Result<AlphaBetaAgent> {
        AlphaBetaAgent::new("alpha-beta", max_depth)
    }

    #[test]
    pub fn board_dimensions() -> Result<()> {
        assert!(ArrayBoard::new(0, 6, 4).is_err());
        assert!(ArrayBoard::new(7, 0, 4).is_err());
        assert!(ArrayBoard::new(7, 6, 0).is_err());
        assert!(ArrayBoard::new(17, 6, 4).is_err());
        assert!(ArrayBoard::new(3, 3, 4).is_err());

        let board = ArrayBoard::new(9, 7, 5)?;
        assert_eq!((board.width(), board.height(), board.connect()), (9, 7, 5));
        assert_eq!(ArrayBoard::new(7, 6, 4)?, ArrayBoard::standard());
        Ok(())
    }

    #[test]
    pub fn illegal_moves() -> Result<()> {
        let mut board = ArrayBoard::from_moves("111111")?;
        assert!(board.play_checked(0).is_err());
        assert!(board.play_checked(8).is_err());
        assert!(board.play_checked(1).is_err());
        assert_eq!(board.play_checked(2)?, GameState::Playing);

        assert!(ArrayBoard::from_moves("12a").is_err());
        // player 1 has already won vertically
        assert!(ArrayBoard::from_moves("12121212").is_err());
        Ok(())
    }

    #[test]
    pub fn win_detection() -> Result<()> {
        // vertical
        let mut board = ArrayBoard::from_moves("1212121")?;
        assert_eq!(board.outcome(), GameState::PlayerOneWin);
        // a won board still has open columns, but refuses further checked moves
        assert_eq!(board.free_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(board.play_checked(2).is_err());

        // the first line decides the game even if play continues
        board.play(1);
        board.play(1);
        assert_eq!(board.outcome(), GameState::PlayerOneWin);
        assert_eq!(board.num_moves(), 9);

        // horizontal
        let board = ArrayBoard::from_moves("1122334")?;
        assert_eq!(board.outcome(), GameState::PlayerOneWin);

        // diagonal
        let board = ArrayBoard::from_moves("12233434744")?;
        assert_eq!(board.outcome(), GameState::PlayerOneWin);

        // the same line in player 2's colour
        let board = ArrayBoard::from_moves("12233434744")?.swapped_colors();
        assert_eq!(board.outcome(), GameState::PlayerTwoWin);

        let board = ArrayBoard::from_moves("1223343474")?;
        assert_eq!(board.outcome(), GameState::Playing);
        assert_eq!(board.free_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    pub fn move_record() -> Result<()> {
        let board = ArrayBoard::from_moves("4453")?;
        assert_eq!(board.moves(), &[3, 3, 4, 2]);

        let mut board = ArrayBoard::new(5, 4, 3)?.with_moves("51")?;
        board.play(2);
        assert_eq!(board.moves(), &[4, 0, 2]);
        assert_eq!(board.num_moves(), 3);
        Ok(())
    }

    #[test]
    pub fn draw_detection() -> Result<()> {
        let board = ArrayBoard::new(2, 1, 2)?.with_moves("12")?;
        assert_eq!(board.outcome(), GameState::Draw);
        assert!(board.free_columns().is_empty());
        Ok(())
    }

    #[test]
    pub fn swapped_colors() -> Result<()> {
        let board = ArrayBoard::from_moves("4453")?;
        let swapped = board.swapped_colors();

        assert_eq!(swapped.player_to_move(), Player::Two);
        assert_eq!(swapped.cell(3, 0), Cell::PlayerTwo);
        assert_eq!(swapped.cell(3, 1), Cell::PlayerOne);
        assert_eq!(swapped.swapped_colors(), board);
        Ok(())
    }

    #[test]
    pub fn completable_lines() -> Result<()> {
        // X O _ on a single row: neither token can still make three
        let board = ArrayBoard::new(3, 1, 3)?.with_moves("12")?;
        assert!(!board.completable_line_at(0, 0));
        assert!(!board.completable_line_at(1, 0));
        assert!(!board.completable_line_at(2, 0));

        let board = ArrayBoard::new(4, 1, 3)?.with_moves("1")?;
        assert!(board.completable_line_at(0, 0));

        // a corner token still has the vertical line
        let board = ArrayBoard::from_moves("12")?;
        assert!(board.completable_line_at(0, 0));
        assert!(board.completable_line_at(1, 0));
        Ok(())
    }

    #[test]
    pub fn evaluation() -> Result<()> {
        let board = ArrayBoard::standard();
        assert_eq!(evaluate(&board, Player::One), 0);

        let board = ArrayBoard::from_moves("4")?;
        assert_eq!(evaluate(&board, Player::One), OWN_LINE_WEIGHT);
        assert_eq!(evaluate(&board, Player::Two), OPPONENT_LINE_WEIGHT);

        let board = ArrayBoard::from_moves("45")?;
        assert_eq!(evaluate(&board, Player::One), 1 - 5);

        // blocked tokens are worth nothing
        let board = ArrayBoard::new(3, 1, 3)?.with_moves("12")?;
        assert_eq!(evaluate(&board, Player::One), 0);

        let board = ArrayBoard::from_moves("1212121")?;
        assert_eq!(evaluate(&board, Player::One), WIN_SCORE);
        assert_eq!(evaluate(&board, Player::Two), LOSS_SCORE);
        assert!(is_proven(WIN_SCORE) && is_proven(LOSS_SCORE) && !is_proven(0));
        Ok(())
    }

    #[test]
    pub fn successor_generation() -> Result<()> {
        let board = ArrayBoard::standard();
        let children = successors(&board);

        assert_eq!(
            children.iter().map(|node| node.column).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 6]
        );
        for node in children.iter() {
            assert_eq!(node.board.num_moves(), 1);
            assert_eq!(node.board.player_to_move(), Player::Two);
            assert_eq!(node.board.cell(node.column, 0), Cell::PlayerOne);
        }
        // the parent is left untouched
        assert_eq!(board, ArrayBoard::standard());

        let board = ArrayBoard::from_moves("111111")?;
        assert_eq!(
            successors(&board).iter().map(|node| node.column).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );

        // a decided game is still expanded over its open columns
        let board = ArrayBoard::from_moves("1212121")?;
        let children = successors(&board);
        assert_eq!(children.len(), 7);
        for node in children.iter() {
            assert_eq!(node.board.outcome(), GameState::PlayerOneWin);
            assert_eq!(node.board.player_to_move(), Player::One);
        }

        // only a full board has no successors
        let board = ArrayBoard::new(2, 1, 2)?.with_moves("12")?;
        assert!(successors(&board).is_empty());
        Ok(())
    }

    #[test]
    pub fn search_leaves() -> Result<()> {
        let board = ArrayBoard::from_moves("4453")?;
        let mut solver = Solver::new(Player::One);

        let result = solver.search(&board, 0);
        assert!(result.best.is_none());
        assert_eq!(result.score, evaluate(&board, Player::One));

        // by default play continues past a completed line
        let board = ArrayBoard::from_moves("1212121")?;
        let mut solver = Solver::new(Player::Two);
        let result = solver.search(&board, 2);
        assert!(result.best.is_some());
        assert!(solver.node_count > 1);

        // unless decided games are leaves
        let mut solver = Solver::new(Player::Two).with_stop_at_decided(true);
        let result = solver.search(&board, 5);
        assert!(result.best.is_none());
        assert_eq!(result.score, LOSS_SCORE);
        assert_eq!(solver.node_count, 1);
        Ok(())
    }

    #[test]
    pub fn determinism() -> Result<()> {
        let board = ArrayBoard::from_moves("4453")?;
        for depth in 1..=4 {
            let first = Solver::new(Player::One).search(&board, depth);
            let second = Solver::new(Player::One).search(&board, depth);
            assert_eq!(first.column(), second.column());
            assert_eq!(first.score, second.score);
        }

        let agent = agent(4)?;
        assert_eq!(agent.select_move(&board), agent.select_move(&board));
        Ok(())
    }

    #[test]
    pub fn tie_break() -> Result<()> {
        // every first move scores the same, the lowest column is kept
        let board = ArrayBoard::standard();
        let result = Solver::new(Player::One).search(&board, 1);
        assert_eq!(result.column(), Some(0));
        assert_eq!(result.score, OWN_LINE_WEIGHT);
        Ok(())
    }

    #[test]
    pub fn single_move() -> Result<()> {
        // X O / O X with only the third column open
        let board = ArrayBoard::new(3, 2, 3)?.with_moves("1221")?;
        assert_eq!(board.free_columns(), vec![2]);

        for max_depth in 1..=4 {
            assert_eq!(agent(max_depth)?.select_move(&board), Some(2));
        }
        Ok(())
    }

    #[test]
    pub fn immediate_win() -> Result<()> {
        // vertical three in the first column
        let board = ArrayBoard::from_moves("121212")?;
        for max_depth in 1..=5 {
            let report = agent(max_depth)?
                .analyse(&board)
                .ok_or_else(|| anyhow!("no move found"))?;
            assert_eq!(report.column, 0);
            assert!(report.is_proven_win());
            assert_eq!(report.depth, 1);
        }

        // horizontal three along the bottom
        let board = ArrayBoard::from_moves("112233")?;
        let report = agent(3)?
            .analyse(&board)
            .ok_or_else(|| anyhow!("no move found"))?;
        assert_eq!(report.column, 3);
        assert!(report.is_proven_win());
        Ok(())
    }

    #[test]
    pub fn forced_block() -> Result<()> {
        // player 1 threatens the fourth column, player 2 has no win of its own
        let board = ArrayBoard::from_moves("17273")?;
        assert_eq!(board.player_to_move(), Player::Two);

        for max_depth in 2..=4 {
            assert_eq!(agent(max_depth)?.select_move(&board), Some(3));
        }
        Ok(())
    }

    #[test]
    pub fn forced_loss() -> Result<()> {
        // an open three on the bottom row cannot be stopped
        let board = ArrayBoard::from_moves("27374")?;
        let report = agent(4)?
            .analyse(&board)
            .ok_or_else(|| anyhow!("no move found"))?;

        assert!(report.is_proven_loss());
        assert_eq!(report.depth, 2);
        // every move loses, so the lowest column is played
        assert_eq!(report.column, 0);
        Ok(())
    }

    #[test]
    pub fn no_legal_moves() -> Result<()> {
        let board = ArrayBoard::from_moves("1212121")?;
        assert_eq!(agent(3)?.select_move(&board), None);

        // searching past the end of the game still finds an open column
        let config = AgentConfig::default()
            .with_max_depth(3)
            .with_stop_at_decided(false);
        let column = AlphaBetaAgent::with_config("relentless", config)?.select_move(&board);
        assert!(column.map_or(false, |column| board.playable(column)));

        let board = ArrayBoard::new(2, 1, 2)?.with_moves("12")?;
        assert_eq!(agent(3)?.select_move(&board), None);
        Ok(())
    }

    #[test]
    pub fn time_budget() -> Result<()> {
        let board = ArrayBoard::standard();

        // a depth that could never finish stops after the first iteration
        let config = AgentConfig::default()
            .with_max_depth(40)
            .with_time_budget(Duration::from_secs(0));
        let report = AlphaBetaAgent::with_config("hasty", config)?
            .analyse(&board)
            .ok_or_else(|| anyhow!("no move found"))?;
        assert_eq!(report.depth, 1);

        let config = AgentConfig::default().with_max_depth(3);
        let report = AlphaBetaAgent::with_config("patient", config)?
            .analyse(&board)
            .ok_or_else(|| anyhow!("no move found"))?;
        assert_eq!(report.depth, 3);
        Ok(())
    }

    #[test]
    pub fn config() -> Result<()> {
        let config = AgentConfig::default();
        assert_eq!(config.max_depth, 7);
        assert_eq!(config.time_budget, Duration::from_secs(12));
        assert!(config.stop_at_decided);
        config.validate()?;

        assert!(AgentConfig::default().with_max_depth(0).validate().is_err());
        assert!(AlphaBetaAgent::new("broken", 0).is_err());
        assert_eq!(agent(5)?.config().max_depth, 5);
        Ok(())
    }

    struct FirstColumnAgent;

    impl Agent for FirstColumnAgent {
        fn name(&self) -> &str {
            "first column"
        }

        fn go(&mut self, _board: &ArrayBoard) -> Option<usize> {
            Some(0)
        }
    }

    #[test]
    pub fn arena_games() -> Result<()> {
        let mut alpha_beta = agent(3)?;
        let mut random = RandomAgent::seeded("random", 7);
        let record = play_game(ArrayBoard::standard(), &mut alpha_beta, &mut random)?;
        assert!(record.outcome().is_over());
        assert_eq!(record.first_player, Player::One);

        // filling the first column ends in an illegal move unless somebody wins first
        let mut first = FirstColumnAgent;
        let mut second = FirstColumnAgent;
        let err = play_game(ArrayBoard::new(3, 2, 3)?, &mut first, &mut second)
            .err()
            .ok_or_else(|| anyhow!("expected an illegal move"))?;
        assert!(err.to_string().contains("first column chose an illegal move"));
        Ok(())
    }

    #[test]
    pub fn arena_series() -> Result<()> {
        let board = ArrayBoard::new(4, 4, 3)?;
        let result = play_series(
            6,
            &board,
            |game| Box::new(RandomAgent::seeded("red", game as u64)) as Box<dyn Agent>,
            |game| Box::new(RandomAgent::seeded("yellow", 100 + game as u64)) as Box<dyn Agent>,
        )?;
        assert_eq!(result.games(), 6);
        assert_eq!(result.names, ("red".to_string(), "yellow".to_string()));

        let alpha_beta = agent(4)?;
        let result = play_series(
            4,
            &ArrayBoard::standard(),
            |_| Box::new(alpha_beta.clone()) as Box<dyn Agent>,
            |game| Box::new(RandomAgent::seeded("random", game as u64)) as Box<dyn Agent>,
        )?;
        assert!(result.wins.0 > result.wins.1);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Property: pruning never changes the score or the chosen move
        #[test]
        fn prop_pruning_matches_minimax(
            columns in prop::collection::vec(0..7usize, 0..30),
            depth in 1..=4usize,
            stop_at_decided in any::<bool>(),
        ) {
            let board = board_from_columns(ArrayBoard::standard(), &columns);
            let root = board.player_to_move();

            let mut pruned = Solver::new(root).with_stop_at_decided(stop_at_decided);
            let mut plain = Solver::new(root).with_stop_at_decided(stop_at_decided);
            let expected = plain.minimax(&board, depth, true);
            let actual = pruned.search(&board, depth);

            prop_assert_eq!(actual.score, expected.score);
            prop_assert_eq!(actual.column(), expected.column());
            prop_assert!(pruned.node_count <= plain.node_count);
        }

        /// Property: deeper trees on a small board agree as well
        #[test]
        fn prop_pruning_matches_minimax_small_board(
            columns in prop::collection::vec(0..4usize, 0..12),
            depth in 1..=6usize,
            stop_at_decided in any::<bool>(),
        ) {
            let board = board_from_columns(ArrayBoard::new(4, 4, 3).unwrap(), &columns);
            let root = board.player_to_move();

            let expected = Solver::new(root)
                .with_stop_at_decided(stop_at_decided)
                .minimax(&board, depth, true);
            let actual = Solver::new(root)
                .with_stop_at_decided(stop_at_decided)
                .search(&board, depth);

            prop_assert_eq!(actual.score, expected.score);
            prop_assert_eq!(actual.column(), expected.column());
        }

        /// Property: exchanging the colours exchanges the point of view
        #[test]
        fn prop_evaluation_symmetry(columns in prop::collection::vec(0..7usize, 0..42)) {
            let board = board_from_columns(ArrayBoard::standard(), &columns);
            let swapped = board.swapped_colors();

            prop_assert_eq!(evaluate(&board, Player::One), evaluate(&swapped, Player::Two));
            prop_assert_eq!(evaluate(&board, Player::Two), evaluate(&swapped, Player::One));
        }
    }
}
