use std::fmt;

use lotto645_db::models::Draw;

/// Rangs du barème officiel : 1 à 5, puis 7 pour une grille perdante.
/// Le rang 6 n'existe pas dans ce barème.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    NoPrize,
}

impl Rank {
    pub fn value(&self) -> u8 {
        match self {
            Rank::First => 1,
            Rank::Second => 2,
            Rank::Third => 3,
            Rank::Fourth => 4,
            Rank::Fifth => 5,
            Rank::NoPrize => 7,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::First => write!(f, "1er rang"),
            Rank::Second => write!(f, "2e rang"),
            Rank::Third => write!(f, "3e rang"),
            Rank::Fourth => write!(f, "4e rang"),
            Rank::Fifth => write!(f, "5e rang"),
            Rank::NoPrize => write!(f, "Perdant"),
        }
    }
}

/// 6 numéros → 1er rang ; 5 + bonus → 2e ; 5 → 3e ; 4 → 4e ; 3 → 5e ;
/// sinon perdant.
pub fn rank_of(matched: usize, bonus_matched: bool) -> Rank {
    match (matched, bonus_matched) {
        (6, _) => Rank::First,
        (5, true) => Rank::Second,
        (5, false) => Rank::Third,
        (4, _) => Rank::Fourth,
        (3, _) => Rank::Fifth,
        _ => Rank::NoPrize,
    }
}

#[derive(Debug, Clone)]
pub struct RankResult {
    pub rank: Rank,
    pub matched: usize,
    /// Grille ayant obtenu ce rang ; None si aucune grille n'a trouvé
    /// le moindre numéro.
    pub numbers: Option<[u8; 6]>,
}

/// Meilleur résultat d'un ensemble de grilles face au tirage officiel.
/// Rang le plus bas d'abord ; à rang égal, plus de numéros trouvés ;
/// à égalité complète, la première grille rencontrée l'emporte.
pub fn best_result(picks: &[[u8; 6]], winning: &Draw) -> RankResult {
    let mut best = RankResult {
        rank: Rank::NoPrize,
        matched: 0,
        numbers: None,
    };

    for pick in picks {
        let matched = pick.iter().filter(|n| winning.numbers.contains(n)).count();
        let bonus_matched = pick.contains(&winning.bonus);
        let rank = rank_of(matched, bonus_matched);

        let better = rank.value() < best.rank.value()
            || (rank.value() == best.rank.value() && matched > best.matched);
        if better {
            best = RankResult {
                rank,
                matched,
                numbers: Some(*pick),
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn winning(numbers: [u8; 6], bonus: u8) -> Draw {
        Draw {
            draw_no: 1101,
            numbers,
            bonus,
        }
    }

    #[test]
    fn test_six_matched_is_first() {
        let result = best_result(&[[1, 2, 3, 4, 5, 6]], &winning([1, 2, 3, 4, 5, 6], 7));
        assert_eq!(result.rank, Rank::First);
        assert_eq!(result.matched, 6);
        assert_eq!(result.numbers, Some([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_five_with_bonus_is_second() {
        let result = best_result(&[[1, 2, 3, 4, 5, 45]], &winning([1, 2, 3, 4, 5, 6], 45));
        assert_eq!(result.rank, Rank::Second);
        assert_eq!(result.matched, 5);
    }

    #[test]
    fn test_five_without_bonus_is_third() {
        let result = best_result(&[[1, 2, 3, 4, 5, 45]], &winning([1, 2, 3, 4, 5, 6], 7));
        assert_eq!(result.rank, Rank::Third);
        assert_eq!(result.matched, 5);
    }

    #[test]
    fn test_four_matched_is_fourth_with_or_without_bonus() {
        assert_eq!(rank_of(4, true), Rank::Fourth);
        assert_eq!(rank_of(4, false), Rank::Fourth);
    }

    #[test]
    fn test_three_matched_is_fifth() {
        assert_eq!(rank_of(3, false), Rank::Fifth);
    }

    #[test]
    fn test_two_or_less_is_no_prize() {
        assert_eq!(rank_of(2, true), Rank::NoPrize);
        assert_eq!(rank_of(1, false), Rank::NoPrize);
        assert_eq!(rank_of(0, false), Rank::NoPrize);
    }

    #[test]
    fn test_rank_values_skip_six() {
        assert_eq!(Rank::Fifth.value(), 5);
        assert_eq!(Rank::NoPrize.value(), 7);
    }

    #[test]
    fn test_best_of_prefers_lower_rank_value() {
        // La grille à 4 numéros (4e rang) bat la grille à 3 (5e rang),
        // même placée après.
        let w = winning([1, 2, 3, 4, 5, 6], 7);
        let picks = [
            [1, 2, 3, 10, 20, 30],
            [1, 2, 3, 4, 20, 30],
        ];
        let result = best_result(&picks, &w);
        assert_eq!(result.rank, Rank::Fourth);
        assert_eq!(result.numbers, Some([1, 2, 3, 4, 20, 30]));
    }

    #[test]
    fn test_best_of_ties_keep_first_pick() {
        let w = winning([1, 2, 3, 4, 5, 6], 7);
        let picks = [
            [1, 2, 3, 10, 20, 30],
            [4, 5, 6, 10, 20, 30],
        ];
        let result = best_result(&picks, &w);
        assert_eq!(result.rank, Rank::Fifth);
        assert_eq!(result.numbers, Some([1, 2, 3, 10, 20, 30]));
    }

    #[test]
    fn test_best_of_rank_tie_prefers_more_matched() {
        // Deux grilles perdantes : 2 numéros trouvés battent 0.
        let w = winning([1, 2, 3, 4, 5, 6], 7);
        let picks = [
            [10, 20, 30, 40, 41, 45],
            [1, 2, 10, 20, 30, 40],
        ];
        let result = best_result(&picks, &w);
        assert_eq!(result.rank, Rank::NoPrize);
        assert_eq!(result.matched, 2);
        assert_eq!(result.numbers, Some([1, 2, 10, 20, 30, 40]));
    }

    #[test]
    fn test_no_picks_keeps_floor() {
        let result = best_result(&[], &winning([1, 2, 3, 4, 5, 6], 7));
        assert_eq!(result.rank, Rank::NoPrize);
        assert_eq!(result.matched, 0);
        assert_eq!(result.numbers, None);
    }

    #[test]
    fn test_zero_matched_everywhere_keeps_floor() {
        let w = winning([1, 2, 3, 4, 5, 6], 7);
        let result = best_result(&[[10, 20, 30, 40, 44, 45]], &w);
        assert_eq!(result.rank, Rank::NoPrize);
        assert_eq!(result.matched, 0);
        assert_eq!(result.numbers, None);
    }

    #[test]
    fn test_rank_labels() {
        assert_eq!(Rank::First.to_string(), "1er rang");
        assert_eq!(Rank::NoPrize.to_string(), "Perdant");
    }
}
