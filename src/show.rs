use itertools::Itertools;

/// Helper trait which can be used to display states, labels and such in a compact,
/// human readable way. For a non-accepting state this is for example `s3`, for a
/// label it is whatever text identifies the symbol.
pub trait Show {
    /// Returns a human readable representation of `self`.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be `{s0, s1, ...}`.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

macro_rules! impl_show_via_to_string {
    ($($t:ty),*) => {
        $(
            impl Show for $t {
                fn show(&self) -> String {
                    self.to_string()
                }
            }
        )*
    }
}

impl_show_via_to_string!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, String, str);

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("\"{}\"", iter.into_iter().join(""))
    }
}

impl Show for () {
    fn show(&self) -> String {
        "-".into()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}
