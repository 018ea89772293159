#[cfg(test)]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !((left_val - right_val).abs() <= *eps_val) {
                    panic!(
                        r#"assertion failed: `(left - right).abs() <= eps`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}
