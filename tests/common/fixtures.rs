//! Test fixtures - kernel Makefiles and a trimmed kernel.spec.

#![allow(dead_code)]

/// Makefile head of a release-candidate tree.
pub const RC_MAKEFILE: &str = "\
# SPDX-License-Identifier: GPL-2.0
VERSION = 5
PATCHLEVEL = 10
SUBLEVEL = 0
EXTRAVERSION = -rc3
NAME = Kleptomaniac Octopus

# *DOCUMENTATION*
# To see a list of typical targets execute \"make help\"
";

/// Makefile head of a final release.
pub const RELEASED_MAKEFILE: &str = "\
VERSION = 3
PATCHLEVEL = 12
SUBLEVEL = 6
EXTRAVERSION =
NAME = One Giant Leap for Frogkind
";

/// A cut-down Fedora kernel.spec with every directive the rewriter touches.
pub const KERNEL_SPEC: &str = "\
# We have to override the new %%install behavior because, well... the kernel is special.
%global __spec_install_pre %{___build_pre}

Summary: The Linux kernel

# For a stable, released kernel, released_kernel should be 1.
%global released_kernel 0

%define buildid .local

# base_sublevel is the kernel version we're starting with and patching
%define base_sublevel 9

## If this is a released kernel ##
%if 0%{?released_kernel}
# Do we have a -stable update to apply?
%define stable_update 14
%else
# The rc snapshot level
%define rcrev 0
# The git snapshot level
%define gitrev 7
%endif

# Set debugbuildsenabled to 1 for production (build separate debug kernels)
%define debugbuildsenabled 0

%define rawhide_skip_docs 1

Name: kernel%{?variant}
License: GPLv2 and Redistributable, no modification permitted
Source0: ftp://ftp.kernel.org/pub/linux/kernel/v3.0/linux-%{kversion}.tar.xz
Source1: Makefile.common

Patch00: patch-3.%{base_sublevel}-git%{gitrev}.xz
Patch470: die-floppy-die.patch

%prep
ApplyPatch die-floppy-die.patch
  ApplyOptionalPatch linux-next.patch

%changelog
* Mon Dec 02 2013 Josh Boyer <jwboyer@fedoraproject.org>
- Linux v3.13-rc2
Patch999: never-seen.patch
";

/// What `KERNEL_SPEC` becomes for `RC_MAKEFILE` at commit `sha`.
pub fn expected_rc_spec(sha: &str) -> String {
    format!(
        "\
%global __spec_install_pre %{{___build_pre}}
Summary: The Linux kernel
%global released_kernel 0
%define buildid .local
%define base_sublevel 10
%if 0%{{?released_kernel}}
%define stable_update 0
%else
%define rcrev 3
%define gitrev 0
%endif
%define debugbuildsenabled 1
%define rawhide_skip_docs 0
Name: kernel%{{?variant}}
License: GPLv2 and Redistributable, no modification permitted
Source0: kernel-{sha}.tar.gz
Source1: Makefile.common
#Patch00: patch-3.%{{base_sublevel}}-git%{{gitrev}}.xz
#Patch470: die-floppy-die.patch
%prep
#ApplyPatch die-floppy-die.patch
#  ApplyOptionalPatch linux-next.patch
"
    )
}

/// Auxiliary files served by the mock package source in end-to-end tests.
pub const AUX_FILES: &[(&str, &str)] = &[
    ("config-generic", "CONFIG_SMP=y\n"),
    ("config-x86_64-generic", "CONFIG_64BIT=y\n"),
    ("Makefile.config", "CONFIGFILES = $(CFG)-x86_64.config\n"),
];
