/// Internal macro used for extracting macro repetition count to reserve
/// capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a [`Polygon`](crate::geometry::Polygon) from a list of `(x, y)`
/// coordinate tuples.
///
/// # Examples
///
/// ```
/// # use polyclip::polygon;
/// let square = polygon![(0, 0), (100, 0), (100, 100), (0, 100)];
/// assert!(square.is_counter_clockwise());
/// assert_eq!(square.points.len(), 4);
/// ```
#[macro_export]
macro_rules! polygon {
    ($( $pt:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($pt) ())),*]);
            let mut points = ::std::vec::Vec::with_capacity(size);
            $(
                points.push($crate::core::math::Point::new($pt.0, $pt.1));
            )*
            $crate::geometry::Polygon::from_points(points)
        }
    };
}

/// Construct an open [`Polyline`](crate::geometry::Polyline) from a list of
/// `(x, y)` coordinate tuples.
#[macro_export]
macro_rules! polyline {
    ($( $pt:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($pt) ())),*]);
            let mut points = ::std::vec::Vec::with_capacity(size);
            $(
                points.push($crate::core::math::Point::new($pt.0, $pt.1));
            )*
            $crate::geometry::Polyline::from_points(points)
        }
    };
}
