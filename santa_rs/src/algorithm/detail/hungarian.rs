use crate::algorithm::definition::Cost;

// ポテンシャル付きの最短増加路で割り当て問題を解く (O(n^3))
// matrix は正方行列。戻り値は行 → 列
// 途中の差分が負になるので i128 で計算する
pub fn solve(matrix: &[Vec<Cost>]) -> Vec<usize> {
    let size = matrix.len();
    if size == 0 {
        return Vec::new();
    }

    let infinity = i128::MAX / 4;

    // 行と列のポテンシャル。添え字 0 は番兵
    let mut row_potential = vec![0i128; size + 1];
    let mut column_potential = vec![0i128; size + 1];

    // 列 → 割り当てられている行 (0 は未割り当て)
    let mut matching = vec![0usize; size + 1];

    // 増加路をたどり直すための直前の列
    let mut way = vec![0usize; size + 1];

    for row in 1..=size {
        matching[0] = row;
        let mut current_column = 0;
        let mut min_values = vec![infinity; size + 1];
        let mut is_used = vec![false; size + 1];

        loop {
            is_used[current_column] = true;
            let current_row = matching[current_column];
            let mut delta = infinity;
            let mut next_column = 0;

            for column in 1..=size {
                if is_used[column] {
                    continue;
                }

                let reduced = matrix[current_row - 1][column - 1] as i128
                    - row_potential[current_row]
                    - column_potential[column];
                if reduced < min_values[column] {
                    min_values[column] = reduced;
                    way[column] = current_column;
                }
                if min_values[column] < delta {
                    delta = min_values[column];
                    next_column = column;
                }
            }

            for column in 0..=size {
                if is_used[column] {
                    row_potential[matching[column]] += delta;
                    column_potential[column] -= delta;
                } else {
                    min_values[column] -= delta;
                }
            }

            current_column = next_column;
            if matching[current_column] == 0 {
                break;
            }
        }

        // 増加路に沿って割り当てを入れ替える
        loop {
            let previous_column = way[current_column];
            matching[current_column] = matching[previous_column];
            current_column = previous_column;
            if current_column == 0 {
                break;
            }
        }
    }

    let mut result = vec![0; size];
    for column in 1..=size {
        result[matching[column] - 1] = column - 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::algorithm::definition::Cost;

    fn total(matrix: &[Vec<Cost>], assignment: &[usize]) -> Cost {
        assignment
            .iter()
            .enumerate()
            .map(|(row, column)| matrix[row][*column])
            .sum()
    }

    #[test]
    fn empty() {
        assert!(super::solve(&[]).is_empty());
    }

    #[test]
    fn simple() {
        let matrix = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        let assignment = super::solve(&matrix);

        assert_eq!(assignment, vec![1, 0, 2]);
        assert_eq!(total(&matrix, &assignment), 5);
    }

    #[test]
    fn matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(3);
        for size in 1..=6 {
            for _ in 0..20 {
                let matrix: Vec<Vec<Cost>> = (0..size)
                    .map(|_| (0..size).map(|_| rng.gen_range(0..10)).collect())
                    .collect();

                let assignment = super::solve(&matrix);
                assert!(assignment.iter().all_unique());

                let optimal = (0..size)
                    .permutations(size)
                    .map(|x| total(&matrix, &x))
                    .min()
                    .unwrap();
                assert_eq!(total(&matrix, &assignment), optimal);
            }
        }
    }
}
