//! object
//!
//! Typed views over the engine's single generic object handle.
//!
//! The native layer has no static type system for its object kinds: every
//! object is one generic handle plus a runtime discriminant. The resolver
//! reconstructs static dispatch at the boundary: query the discriminant
//! once, then wrap the handle in the matching view. Unknown-but-valid kinds
//! (delta representations, future kinds) fall back to [`GenericObject`];
//! only the explicit invalid discriminant is a failure, and a null handle
//! is a local programming error rather than anything native.

use libc::c_int;

use crate::buf::{c_str_to_string, Buf};
use crate::codec::NativeEnum;
use crate::error::{self, Error};
use crate::handle::Handle;
use crate::oid::Oid;
use crate::raw;
use crate::repo::Repository;

/// The runtime kind discriminant carried by every native object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Wildcard used in lookups to accept any kind.
    Any,
    /// The explicit invalid discriminant; also the decode fallback.
    Invalid,
    Commit,
    Tree,
    Blob,
    Tag,
    /// Delta against another object given by offset (packfile internal).
    OfsDelta,
    /// Delta against another object given by id (packfile internal).
    RefDelta,
}

impl NativeEnum for ObjectKind {
    fn decode(raw: c_int) -> ObjectKind {
        match raw {
            raw::GIT_OBJECT_ANY => ObjectKind::Any,
            raw::GIT_OBJECT_COMMIT => ObjectKind::Commit,
            raw::GIT_OBJECT_TREE => ObjectKind::Tree,
            raw::GIT_OBJECT_BLOB => ObjectKind::Blob,
            raw::GIT_OBJECT_TAG => ObjectKind::Tag,
            raw::GIT_OBJECT_OFS_DELTA => ObjectKind::OfsDelta,
            raw::GIT_OBJECT_REF_DELTA => ObjectKind::RefDelta,
            _ => ObjectKind::Invalid,
        }
    }

    fn encode(self) -> c_int {
        match self {
            ObjectKind::Any => raw::GIT_OBJECT_ANY,
            ObjectKind::Invalid => raw::GIT_OBJECT_INVALID,
            ObjectKind::Commit => raw::GIT_OBJECT_COMMIT,
            ObjectKind::Tree => raw::GIT_OBJECT_TREE,
            ObjectKind::Blob => raw::GIT_OBJECT_BLOB,
            ObjectKind::Tag => raw::GIT_OBJECT_TAG,
            ObjectKind::OfsDelta => raw::GIT_OBJECT_OFS_DELTA,
            ObjectKind::RefDelta => raw::GIT_OBJECT_REF_DELTA,
        }
    }
}

/// Which view wraps a resolved handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved {
    Commit,
    Tree,
    Blob,
    Tag,
    Generic,
}

/// The dispatch table of the resolver, separated from handle plumbing so
/// the mapping is testable without native objects.
fn classify(kind: ObjectKind) -> Result<Resolved, Error> {
    match kind {
        ObjectKind::Invalid => Err(Error::UnsupportedType {
            kind: kind.encode(),
        }),
        ObjectKind::Commit => Ok(Resolved::Commit),
        ObjectKind::Tree => Ok(Resolved::Tree),
        ObjectKind::Blob => Ok(Resolved::Blob),
        ObjectKind::Tag => Ok(Resolved::Tag),
        _ => Ok(Resolved::Generic),
    }
}

/// Owned handle plus the base operations every view shares.
pub(crate) struct ObjectHandle {
    handle: Handle<raw::git_object>,
}

impl ObjectHandle {
    fn new(ptr: *mut raw::git_object) -> ObjectHandle {
        ObjectHandle {
            handle: Handle::new(ptr, "object"),
        }
    }

    fn get(&self) -> Result<*mut raw::git_object, Error> {
        self.handle.get()
    }

    fn id(&self) -> Result<Oid, Error> {
        let ptr = self.get()?;
        Ok(unsafe { Oid::from_ptr(raw::git_object_id(ptr)) })
    }

    fn kind(&self) -> Result<ObjectKind, Error> {
        let ptr = self.get()?;
        Ok(ObjectKind::decode(unsafe { raw::git_object_type(ptr) }))
    }

    fn short_id(&self) -> Result<String, Error> {
        let ptr = self.get()?;
        let mut buf = Buf::new();
        unsafe {
            error::check(raw::git_object_short_id(buf.as_raw_mut(), ptr))?;
        }
        Ok(buf.to_string_lossy())
    }

    fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        let ptr = self.get()?;
        let mut out = std::ptr::null_mut();
        unsafe {
            error::check(raw::git_object_peel(&mut out, ptr, target.encode()))?;
            Object::from_raw(out)
        }
    }

    fn dup(&self) -> Result<Object, Error> {
        let ptr = self.get()?;
        let mut out = std::ptr::null_mut();
        unsafe {
            error::check(raw::git_object_dup(&mut out, ptr))?;
            Object::from_raw(out)
        }
    }

    fn owner(&self) -> Result<Repository, Error> {
        let ptr = self.get()?;
        let repo = unsafe { raw::git_object_owner(ptr) };
        Ok(Repository::from_borrowed(repo))
    }

    fn close(&self) {
        self.handle.release_with(raw::git_object_free);
    }
}

impl Drop for ObjectHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// A resolved object: the generic native handle wrapped in its typed view.
pub enum Object {
    Commit(Commit),
    Tree(Tree),
    Blob(Blob),
    Tag(Tag),
    Generic(GenericObject),
}

impl Object {
    /// Resolve a raw object handle into its typed view.
    ///
    /// A null handle fails with [`Error::InvalidState`]: that is a local
    /// precondition of this layer, never a native failure. The explicit
    /// invalid discriminant fails with [`Error::UnsupportedType`]; any
    /// other recognized-but-unmapped kind wraps as [`Object::Generic`].
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live object handle owned by the caller;
    /// ownership transfers to the returned view.
    pub(crate) unsafe fn from_raw(ptr: *mut raw::git_object) -> Result<Object, Error> {
        if ptr.is_null() {
            return Err(Error::InvalidState {
                message: "object address is null, has it been released?".into(),
            });
        }
        let kind = ObjectKind::decode(raw::git_object_type(ptr));
        let inner = ObjectHandle::new(ptr);
        Ok(match classify(kind)? {
            Resolved::Commit => Object::Commit(Commit { inner }),
            Resolved::Tree => Object::Tree(Tree { inner }),
            Resolved::Blob => Object::Blob(Blob { inner }),
            Resolved::Tag => Object::Tag(Tag { inner }),
            Resolved::Generic => Object::Generic(GenericObject { inner }),
        })
    }

    fn base(&self) -> &ObjectHandle {
        match self {
            Object::Commit(c) => &c.inner,
            Object::Tree(t) => &t.inner,
            Object::Blob(b) => &b.inner,
            Object::Tag(t) => &t.inner,
            Object::Generic(g) => &g.inner,
        }
    }

    /// The object's content identifier.
    pub fn id(&self) -> Result<Oid, Error> {
        self.base().id()
    }

    /// The runtime kind discriminant.
    pub fn kind(&self) -> Result<ObjectKind, Error> {
        self.base().kind()
    }

    /// Short abbreviated id string, unique within the repository.
    pub fn short_id(&self) -> Result<String, Error> {
        self.base().short_id()
    }

    /// Recursively peel until an object of the target kind is met.
    pub fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        self.base().peel(target)
    }

    /// An independently owned copy of this object.
    pub fn dup(&self) -> Result<Object, Error> {
        self.base().dup()
    }

    /// The repository that owns this object, as a borrowed handle.
    /// Releasing it does not free the repository.
    pub fn owner(&self) -> Result<Repository, Error> {
        self.base().owner()
    }

    /// Release the native handle now rather than at drop.
    pub fn close(&self) {
        self.base().close()
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Object::Commit(_) => "Commit",
            Object::Tree(_) => "Tree",
            Object::Blob(_) => "Blob",
            Object::Tag(_) => "Tag",
            Object::Generic(_) => "Generic",
        };
        write!(f, "Object::{name}")
    }
}

/// A commit view.
pub struct Commit {
    inner: ObjectHandle,
}

impl Commit {
    fn raw(&self) -> Result<*mut raw::git_commit, Error> {
        Ok(self.inner.get()? as *mut raw::git_commit)
    }

    pub fn id(&self) -> Result<Oid, Error> {
        self.inner.id()
    }

    pub fn short_id(&self) -> Result<String, Error> {
        self.inner.short_id()
    }

    pub fn kind(&self) -> Result<ObjectKind, Error> {
        self.inner.kind()
    }

    pub fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        self.inner.peel(target)
    }

    pub fn dup(&self) -> Result<Object, Error> {
        self.inner.dup()
    }

    pub fn owner(&self) -> Result<Repository, Error> {
        self.inner.owner()
    }

    /// Full commit message; empty when the commit has none.
    pub fn message(&self) -> Result<String, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { c_str_to_string(raw::git_commit_message(ptr)) }.unwrap_or_default())
    }

    /// First paragraph of the message, if it can be derived.
    pub fn summary(&self) -> Result<Option<String>, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { c_str_to_string(raw::git_commit_summary(ptr)) })
    }

    /// Commit time in seconds since epoch.
    pub fn time(&self) -> Result<i64, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { raw::git_commit_time(ptr) })
    }

    pub fn parent_count(&self) -> Result<usize, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { raw::git_commit_parentcount(ptr) } as usize)
    }

    /// Id of the n-th parent, or `None` past the last one.
    pub fn parent_id(&self, n: usize) -> Result<Option<Oid>, Error> {
        let ptr = self.raw()?;
        let parent = unsafe { raw::git_commit_parent_id(ptr, n as libc::c_uint) };
        if parent.is_null() {
            return Ok(None);
        }
        Ok(Some(unsafe { Oid::from_ptr(parent) }))
    }

    /// Id of the tree this commit points to.
    pub fn tree_id(&self) -> Result<Oid, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { Oid::from_ptr(raw::git_commit_tree_id(ptr)) })
    }

    pub fn close(&self) {
        self.inner.close()
    }
}

/// A tree view.
pub struct Tree {
    inner: ObjectHandle,
}

impl Tree {
    fn raw(&self) -> Result<*mut raw::git_tree, Error> {
        Ok(self.inner.get()? as *mut raw::git_tree)
    }

    pub fn id(&self) -> Result<Oid, Error> {
        self.inner.id()
    }

    pub fn short_id(&self) -> Result<String, Error> {
        self.inner.short_id()
    }

    pub fn kind(&self) -> Result<ObjectKind, Error> {
        self.inner.kind()
    }

    pub fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        self.inner.peel(target)
    }

    pub fn dup(&self) -> Result<Object, Error> {
        self.inner.dup()
    }

    pub fn owner(&self) -> Result<Repository, Error> {
        self.inner.owner()
    }

    /// Number of entries directly in this tree.
    pub fn len(&self) -> Result<usize, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { raw::git_tree_entrycount(ptr) })
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }

    pub fn close(&self) {
        self.inner.close()
    }
}

/// A blob view.
pub struct Blob {
    inner: ObjectHandle,
}

impl Blob {
    fn raw(&self) -> Result<*mut raw::git_blob, Error> {
        Ok(self.inner.get()? as *mut raw::git_blob)
    }

    pub fn id(&self) -> Result<Oid, Error> {
        self.inner.id()
    }

    pub fn short_id(&self) -> Result<String, Error> {
        self.inner.short_id()
    }

    pub fn kind(&self) -> Result<ObjectKind, Error> {
        self.inner.kind()
    }

    pub fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        self.inner.peel(target)
    }

    pub fn dup(&self) -> Result<Object, Error> {
        self.inner.dup()
    }

    pub fn owner(&self) -> Result<Repository, Error> {
        self.inner.owner()
    }

    pub fn size(&self) -> Result<u64, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { raw::git_blob_rawsize(ptr) })
    }

    /// Copy of the raw blob content.
    pub fn content(&self) -> Result<Vec<u8>, Error> {
        let ptr = self.raw()?;
        let size = unsafe { raw::git_blob_rawsize(ptr) } as usize;
        let data = unsafe { raw::git_blob_rawcontent(ptr) };
        if data.is_null() || size == 0 {
            return Ok(Vec::new());
        }
        Ok(unsafe { std::slice::from_raw_parts(data as *const u8, size) }.to_vec())
    }

    /// Heuristic binary detection over the blob content.
    pub fn is_binary(&self) -> Result<bool, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { raw::git_blob_is_binary(ptr) } == 1)
    }

    pub fn close(&self) {
        self.inner.close()
    }
}

/// An annotated tag view.
pub struct Tag {
    inner: ObjectHandle,
}

impl Tag {
    fn raw(&self) -> Result<*mut raw::git_tag, Error> {
        Ok(self.inner.get()? as *mut raw::git_tag)
    }

    pub fn id(&self) -> Result<Oid, Error> {
        self.inner.id()
    }

    pub fn short_id(&self) -> Result<String, Error> {
        self.inner.short_id()
    }

    pub fn kind(&self) -> Result<ObjectKind, Error> {
        self.inner.kind()
    }

    pub fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        self.inner.peel(target)
    }

    pub fn dup(&self) -> Result<Object, Error> {
        self.inner.dup()
    }

    pub fn owner(&self) -> Result<Repository, Error> {
        self.inner.owner()
    }

    pub fn name(&self) -> Result<String, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { c_str_to_string(raw::git_tag_name(ptr)) }.unwrap_or_default())
    }

    pub fn message(&self) -> Result<Option<String>, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { c_str_to_string(raw::git_tag_message(ptr)) })
    }

    pub fn target_id(&self) -> Result<Oid, Error> {
        let ptr = self.raw()?;
        Ok(unsafe { Oid::from_ptr(raw::git_tag_target_id(ptr)) })
    }

    pub fn target_kind(&self) -> Result<ObjectKind, Error> {
        let ptr = self.raw()?;
        Ok(ObjectKind::decode(unsafe { raw::git_tag_target_type(ptr) }))
    }

    pub fn close(&self) {
        self.inner.close()
    }
}

/// View for kinds with no richer wrapper (delta representations, kinds
/// newer than this crate). Carries the full base operation set.
pub struct GenericObject {
    inner: ObjectHandle,
}

impl GenericObject {
    pub fn id(&self) -> Result<Oid, Error> {
        self.inner.id()
    }

    pub fn kind(&self) -> Result<ObjectKind, Error> {
        self.inner.kind()
    }

    pub fn short_id(&self) -> Result<String, Error> {
        self.inner.short_id()
    }

    pub fn peel(&self, target: ObjectKind) -> Result<Object, Error> {
        self.inner.peel(target)
    }

    pub fn dup(&self) -> Result<Object, Error> {
        self.inner.dup()
    }

    pub fn owner(&self) -> Result<Repository, Error> {
        self.inner.owner()
    }

    pub fn close(&self) {
        self.inner.close()
    }
}
