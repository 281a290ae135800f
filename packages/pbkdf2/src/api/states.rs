//! Type states for the lane batch builder

/// Type state indicating no salt has been set
#[derive(Clone, Debug)]
pub struct NoSalt;

/// Type state indicating the common salt prefix has been set
#[derive(Clone, Debug)]
pub struct HasSalt(pub Vec<u8>);

/// Type state indicating no iteration count has been set
#[derive(Clone, Debug)]
pub struct NoPasses;

/// Type state indicating the total iteration count has been set
#[derive(Clone, Debug)]
pub struct HasPasses(pub u32);
