use super::decode::*;
use alloc::vec::Vec;

pub struct Sequence<'a, const D: usize> {
    data: &'a [u8],
    count: Option<usize>,
    offset: &'a mut usize,
    parsed: usize,
}

impl<'a, const D: usize> Sequence<'a, D> {
    pub(super) fn new(data: &'a [u8], count: Option<usize>, offset: &'a mut usize) -> Self {
        Self {
            data,
            count,
            offset,
            parsed: 0,
        }
    }

    /// The number of items (or pairs, for a map), if known
    pub fn len(&self) -> Option<usize> {
        self.count.map(|c| c / D)
    }

    pub fn is_definite(&self) -> bool {
        self.count.is_some()
    }

    fn check_for_end(&mut self) -> Result<bool, Error> {
        if let Some(count) = self.count {
            return Ok(self.parsed >= count);
        }
        match self.data.get(*self.offset) {
            None => Err(Error::NotEnoughData),
            Some(0xFF) => {
                if self.parsed % D != 0 {
                    Err(Error::PartialMap)
                } else {
                    *self.offset += 1;
                    self.count = Some(self.parsed);
                    Ok(true)
                }
            }
            Some(_) => Ok(false),
        }
    }

    /// Returns the offset just past the end of the sequence if there are no more items
    pub fn end(&mut self) -> Result<Option<usize>, Error> {
        if self.check_for_end()? {
            Ok(Some(*self.offset))
        } else {
            Ok(None)
        }
    }

    pub(super) fn complete(mut self) -> Result<(), Error> {
        if !self.check_for_end()? {
            return Err(Error::AdditionalItems);
        }
        Ok(())
    }

    pub fn try_parse_value<T, F, E>(&mut self, f: F) -> Result<Option<(T, usize)>, E>
    where
        F: FnOnce(Value, bool, Vec<u64>) -> Result<T, E>,
        E: From<Error>,
    {
        if self.check_for_end()? {
            return Ok(None);
        }

        // Parse sub-item
        let item_start = *self.offset;
        match try_parse_value(&self.data[item_start..], f)? {
            Some((r, len)) => {
                self.parsed += 1;
                *self.offset += len;
                Ok(Some((r, len)))
            }
            None => Err(Error::NotEnoughData.into()),
        }
    }

    #[inline]
    pub fn parse_value<T, F, E>(&mut self, f: F) -> Result<(T, usize), E>
    where
        F: FnOnce(Value, bool, Vec<u64>) -> Result<T, E>,
        E: From<Error>,
    {
        self.try_parse_value(f)?.ok_or(Error::NotEnoughData.into())
    }
}
