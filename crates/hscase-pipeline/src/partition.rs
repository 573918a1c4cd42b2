/// Number of groups per classification batch.
pub const GROUP_COUNT: usize = 5;

/// Slice a ranked pool into `group_count` contiguous, non-overlapping
/// groups. Group size is `len / group_count`; the remainder folds entirely
/// into the final group, so concatenating the groups in order reconstructs
/// the pool exactly.
pub fn partition<T>(pool: &[T], group_count: usize) -> Vec<&[T]> {
    assert!(group_count > 0, "group_count must be positive");
    let chunk = pool.len() / group_count;
    let mut groups = Vec::with_capacity(group_count);
    let mut start = 0;
    for g in 0..group_count {
        let end = if g + 1 == group_count { pool.len() } else { start + chunk };
        groups.push(&pool[start..end]);
        start = end;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_folds_into_the_final_group() {
        let pool: Vec<u32> = (0..23).collect();
        let groups = partition(&pool, GROUP_COUNT);
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(sizes, vec![4, 4, 4, 4, 7]);
    }

    #[test]
    fn concatenation_reconstructs_the_pool() {
        let pool: Vec<u32> = (0..23).collect();
        let groups = partition(&pool, GROUP_COUNT);
        let rebuilt: Vec<u32> = groups.iter().flat_map(|g| g.iter().copied()).collect();
        assert_eq!(rebuilt, pool);
    }

    #[test]
    fn short_pools_land_in_the_final_group() {
        let pool = [1, 2, 3];
        let groups = partition(&pool, GROUP_COUNT);
        assert_eq!(groups.len(), GROUP_COUNT);
        assert!(groups[..4].iter().all(|g| g.is_empty()));
        assert_eq!(groups[4], &[1, 2, 3]);
    }

    #[test]
    fn empty_pool_yields_empty_groups() {
        let pool: [u32; 0] = [];
        let groups = partition(&pool, GROUP_COUNT);
        assert_eq!(groups.len(), GROUP_COUNT);
        assert!(groups.iter().all(|g| g.is_empty()));
    }

    #[test]
    fn exact_division_is_even() {
        let pool: Vec<u32> = (0..10).collect();
        let groups = partition(&pool, GROUP_COUNT);
        assert!(groups.iter().all(|g| g.len() == 2));
    }
}
