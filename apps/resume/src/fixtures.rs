//! Sample resumes shared by unit tests.

/// Smallest resume touching all four sections, in canonical form.
pub const MINIMAL_RESUME: &str = "\
# Personal

## Contact Information

Name: Jane Doe

# Education

## Degrees

### Degree

School: State University

# Certifications

## Certifications

### Certification

Name: AWS Solutions Architect

# Experience

## Projects

### Project

#### Overview

Title: Resume Builder

#### Description

Command-line resume formatter.

## Roles

### Role

#### Basics

Company: Acme Corp
Start Date: 01/2019
Title: Software Engineer
";

/// Every block type, written loosely: sections out of order, mixed header
/// case, extra blank lines, unknown keys, and keys out of canonical order.
pub const FULL_RESUME: &str = "\
# experience

## Roles

### Role
#### Basics
Title: Backend Engineer
Company: Initech
Start Date: 01/2019
End Date: 01/2021
Location: Austin, TX
Employment Type: Full-time
Manager: Bill Lumbergh

#### Summary
Built the billing platform.

#### Responsibilities
Owned the payments service.

Carried the on-call pager for 40 services.

#### Skills
* Python
* Go
* Rust

### Role

#### Basics
Company: Globex
Title: Staff Engineer
Start Date: 02/2021
End Date: 12/2022
Reason For Change: Relocation

#### Responsibilities
Led the storage team.

### Role

#### Basics
Company: Hooli
Title: Principal Engineer
Start Date: 01/2023

#### Summary
Platform architecture.

#### Skills
* Kubernetes
* Rust

## Projects

### Project

#### Overview
Title: Resume Builder
URL: https://example.com/resume
URL Description: Live demo
Start Date: 03/2020

#### Description

A resume formatter.

#### Skills
* Rust

### Project

#### Description
Personal site generator.

#### Overview
Title: Site Gen

# PERSONAL

## Contact Information
Name: Jane Doe
Email: jane@example.com
Phone: +1 555 0100
Location: Austin, TX

## Websites
GitHub: https://github.com/janedoe
LinkedIn: https://linkedin.com/in/janedoe

## Visa Status
Work Status: Citizen
Require Sponsorship: No

## Banner
Backend engineer focused on **reliability**.

Open to remote roles.

## Note
References available on request.

# Certifications

## Certifications

### Certification
Name: CKA
Issuer: CNCF
Issued: 05/2022
Expires: 05/2025
ID: CKA-1234

# Education

## Degrees

### Degree
School: State University
Degree: B.S.
Major: Computer Science
Start Date: 09/2010
End Date: 06/2014
GPA: 3.8

### Degree
School: Tech Institute
Degree: M.S.
";
