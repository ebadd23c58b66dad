//! 笛卡尔积迭代器
//!
//! 用里程表式的索引向量推进，内存占用只与位置数有关，与组合总数无关。

use num_bigint::BigUint;

/// 按位置字符集生成笛卡尔积，最左侧位置变化最慢
#[derive(Debug, Clone)]
pub struct CartesianProduct {
    positions: Vec<Vec<char>>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl CartesianProduct {
    /// 从每个位置的候选字符集创建迭代器
    ///
    /// 零个位置时产生一个空字符串；任一位置为空时不产生任何结果。
    pub fn new(positions: Vec<Vec<char>>) -> Self {
        let exhausted = positions.iter().any(|set| set.is_empty());
        let indices = vec![0; positions.len()];
        Self {
            positions,
            indices,
            exhausted,
        }
    }

    /// 同一字符集重复 `length` 次
    pub fn repeat(charset: &[char], length: usize) -> Self {
        Self::new(vec![charset.to_vec(); length])
    }

    /// 组合总数
    pub fn len_exact(&self) -> BigUint {
        self.positions
            .iter()
            .fold(BigUint::from(1u32), |acc, set| acc * set.len())
    }

    fn current(&self) -> String {
        self.indices
            .iter()
            .zip(&self.positions)
            .map(|(&i, set)| set[i])
            .collect()
    }

    fn advance(&mut self) {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.positions[pos].len() {
                return;
            }
            self.indices[pos] = 0;
        }
        // 所有位置都已回绕
        self.exhausted = true;
    }
}

impl Iterator for CartesianProduct {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let candidate = self.current();
        self.advance();
        Some(candidate)
    }
}
