#![warn(missing_docs)]
//! `uom` macros for the three length scales used by the beam formulas.
//!
//! A single argument creates a [`Length`](uom::si::f64::Length), several arguments a `Vec<Length>`.

/// helper macro to create one or several lengths of the given unit
#[macro_export]
macro_rules! uom_length_creator {
    ($unit:ident, $val1:expr) => {
        uom::si::f64::Length::new::<$unit>($val1)
    };
    ($unit:ident, $( $x:expr ),+) => {
        {
            let mut lengths = Vec::new();
            $(
                lengths.push(uom::si::f64::Length::new::<$unit>($x));
            )+
            lengths
        }
    };
}

///macro to create a Length in millimeter (axial distances, focal lengths)
#[macro_export]
macro_rules! millimeter {
    ($( $x:expr ),+) =>{{
        use uom::si::length::millimeter;
        $crate::uom_length_creator![millimeter, $( $x ),+]
    }};
}
///macro to create a Length in micrometer (beam waists and radii)
#[macro_export]
macro_rules! micrometer {
    ($( $x:expr ),+) =>{{
        use uom::si::length::micrometer;
        $crate::uom_length_creator![micrometer, $( $x ),+]
    }};
}
///macro to create a Length in nanometer (wavelengths)
#[macro_export]
macro_rules! nanometer {
    ($( $x:expr ),+) =>{{
        use uom::si::length::nanometer;
        $crate::uom_length_creator![nanometer, $( $x ),+]
    }};
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use uom::si::length::{meter, micrometer, millimeter, nanometer};

    #[test]
    fn single_values() {
        assert_relative_eq!(millimeter!(45.0).get::<meter>(), 0.045);
        assert_relative_eq!(micrometer!(40.0).get::<meter>(), 40.0e-6);
        assert_relative_eq!(nanometer!(1000.0).get::<meter>(), 1.0e-6);
        assert_relative_eq!(micrometer!(40.0).get::<micrometer>(), 40.0);
    }
    #[test]
    fn several_values() {
        let distances = millimeter!(15.0, 30.0);
        assert_eq!(distances.len(), 2);
        assert_relative_eq!(distances[0].get::<millimeter>(), 15.0);
        assert_relative_eq!(distances[1].get::<millimeter>(), 30.0);
        let wavelengths = nanometer!(500.0, 1000.0, 1064.0);
        assert_eq!(wavelengths.len(), 3);
        assert_relative_eq!(wavelengths[2].get::<nanometer>(), 1064.0);
    }
}
