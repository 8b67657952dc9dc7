use crate::error::ErrorDetail;

/// The number of 16-bit slots allocated to the stack
pub(crate) const STACK_SLOTS: usize = 16;
/// The number of slots a program may actually occupy.  Original interpreters reserved
/// sixteen slots but documented a nesting depth of eight, so pushes beyond this limit
/// are treated as a stack overflow.
pub(crate) const STACK_DEPTH_LIMIT: usize = 8;

/// An abstraction of the CHIP-8 call stack, used to store return addresses for
/// subroutine calls.
#[derive(Clone, Debug, PartialEq)]
pub struct Stack {
    /// A stack-allocated array of two-byte values representing the stack contents
    pub bytes: [u16; STACK_SLOTS],
    /// A pointer to the next free slot on the stack
    pub pointer: usize,
}

impl Stack {
    /// Constructor that returns an empty [Stack] instance.
    pub(crate) fn new() -> Self {
        Stack {
            bytes: [0x0; STACK_SLOTS],
            pointer: 0x0,
        }
    }

    /// Pushes the supplied value onto the stack, returning [ErrorDetail::PushFullStack]
    /// if the usable depth limit has been reached.
    ///
    /// # Arguments
    ///
    /// * `value` - the value to push
    pub(crate) fn push(&mut self, value: u16) -> Result<(), ErrorDetail> {
        if self.pointer >= STACK_DEPTH_LIMIT {
            return Err(ErrorDetail::PushFullStack);
        }
        self.bytes[self.pointer] = value;
        self.pointer += 1;
        Ok(())
    }

    /// Pops the topmost value off the stack, returning [ErrorDetail::PopEmptyStack]
    /// if the stack holds no values.
    pub(crate) fn pop(&mut self) -> Result<u16, ErrorDetail> {
        if self.pointer == 0x0 {
            return Err(ErrorDetail::PopEmptyStack);
        }
        self.pointer -= 1;
        Ok(self.bytes[self.pointer])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push() {
        let mut stack: Stack = Stack::new();
        stack.push(0x2F1).unwrap();
        assert!(stack.bytes[0x0] == 0x2F1 && stack.pointer == 0x1);
    }

    #[test]
    fn test_push_full_stack_error() {
        let mut stack: Stack = Stack::new();
        stack.pointer = STACK_DEPTH_LIMIT;
        assert_eq!(stack.push(0x2F1).unwrap_err(), ErrorDetail::PushFullStack);
    }

    #[test]
    fn test_pop() {
        let mut stack: Stack = Stack::new();
        stack.bytes[0x0] = 0x2F1;
        stack.bytes[0x1] = 0x8E4;
        stack.pointer = 0x2;
        assert!(stack.pop().unwrap() == 0x8E4 && stack.pointer == 0x1);
    }

    #[test]
    fn test_pop_empty_stack_error() {
        let mut stack: Stack = Stack::new();
        assert_eq!(stack.pop().unwrap_err(), ErrorDetail::PopEmptyStack);
    }

    #[test]
    fn test_push_pop_order() {
        let mut stack: Stack = Stack::new();
        stack.push(0x201).unwrap();
        stack.push(0x3A5).unwrap();
        assert!(stack.pop().unwrap() == 0x3A5 && stack.pop().unwrap() == 0x201);
    }

    #[test]
    fn test_push_to_depth_limit() {
        let mut stack: Stack = Stack::new();
        for i in 0..STACK_DEPTH_LIMIT {
            stack.push(i as u16).unwrap();
        }
        assert!(stack.pointer == STACK_DEPTH_LIMIT && stack.push(0xFFF).is_err());
    }
}
