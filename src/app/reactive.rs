//! Observable single-field containers.
//!
//! Each cell carries one value and any number of bindings. A binding pairs a
//! pure render function (value in, markup out) with an apply sink that pushes
//! the markup into a display target. Binding renders immediately; every later
//! write re-renders in program order.

type RenderFn<T> = Box<dyn Fn(&T) -> String>;
type ApplyFn<T> = Box<dyn FnMut(&T, &str)>;

struct Binding<T> {
    render: RenderFn<T>,
    apply: ApplyFn<T>,
}

pub struct Cell<T> {
    value: T,
    bindings: Vec<Binding<T>>,
}

impl<T> Cell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            bindings: Vec::new(),
        }
    }

    /// Register a render function and an apply sink, then render once so the
    /// target reflects the current value.
    pub fn bind(
        &mut self,
        render: impl Fn(&T) -> String + 'static,
        apply: impl FnMut(&T, &str) + 'static,
    ) {
        let mut binding = Binding {
            render: Box::new(render),
            apply: Box::new(apply),
        };
        let markup = (binding.render)(&self.value);
        (binding.apply)(&self.value, &markup);
        self.bindings.push(binding);
    }

    /// Write a new value and synchronously re-render every binding.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for binding in &mut self.bindings {
            let markup = (binding.render)(&self.value);
            (binding.apply)(&self.value, &markup);
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}
