use std::fmt;

/// Maps one name to another, or misses.
///
/// Implementations must not have side effects: the engine is the only thing
/// that writes into flags.
pub trait Mapper {
    fn map(&self, name: &str) -> Option<String>;
}

impl<M: Mapper + ?Sized> Mapper for &M {
    fn map(&self, name: &str) -> Option<String> {
        (**self).map(name)
    }
}

impl<M: Mapper + ?Sized> Mapper for Box<M> {
    fn map(&self, name: &str) -> Option<String> {
        (**self).map(name)
    }
}

/// Adapts a plain function or closure into a [`Mapper`].
#[derive(Clone, Copy)]
pub struct MapFn<F>(pub F);

impl<F> Mapper for MapFn<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn map(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

impl<F> fmt::Debug for MapFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MapFn(..)")
    }
}

/// Mappers applied one after another, the output of each feeding the next.
///
/// A chain hits only if every stage hits. The first miss stops the chain and
/// later stages are not called. An empty chain misses everything.
#[derive(Clone, Default)]
pub struct Chain<'a> {
    stages: Vec<&'a dyn Mapper>,
}

impl<'a> Chain<'a> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn then(mut self, mapper: &'a dyn Mapper) -> Self {
        self.stages.push(mapper);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Mapper for Chain<'_> {
    fn map(&self, name: &str) -> Option<String> {
        let (first, rest) = self.stages.split_first()?;
        let mut mapped = first.map(name)?;
        for stage in rest {
            mapped = stage.map(&mapped)?;
        }
        Some(mapped)
    }
}

impl fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("stages", &self.stages.len())
            .finish()
    }
}

/// Compose `mappers` into a single [`Chain`], in the given order.
pub fn compose<'a>(mappers: &[&'a dyn Mapper]) -> Chain<'a> {
    Chain {
        stages: mappers.to_vec(),
    }
}
